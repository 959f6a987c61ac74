use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use parking_lot::RwLock;
use tracing::warn;

/// Cross-tab persistent store (the localStorage analog).
///
/// All tabs of the profile share one `DurableStore`; cloning shares the map.
/// When opened with a backing file, every mutation writes the whole map back
/// as JSON. Load and save failures are logged and ignored so an unwritable
/// disk never breaks the caller; last write wins between tabs, there is no
/// cross-tab ordering guarantee.
#[derive(Clone)]
pub struct DurableStore {
    path: Option<PathBuf>,
    map: Arc<RwLock<HashMap<String, String>>>,
}

impl DurableStore {
    /// In-memory store, used by tests and when no state file is configured.
    pub fn in_memory() -> Self {
        Self { path: None, map: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Open a file-backed store, seeding from the file when it parses.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut map = HashMap::new();
        match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, String>>(&bytes) {
                Ok(m) => map = m,
                Err(e) => warn!(target: "cartable", "state file unreadable, starting empty: {}", e),
            },
            Err(_) => {} // first run
        }
        Self { path: Some(path), map: Arc::new(RwLock::new(map)) }
    }

    fn save(&self) {
        let Some(path) = self.path.as_ref() else { return };
        let bytes = {
            let m = self.map.read();
            serde_json::to_vec_pretty(&*m).unwrap_or_default()
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).ok();
        }
        if let Err(e) = std::fs::write(path, bytes) {
            warn!(target: "cartable", "state file write failed: {}", e);
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.map.read().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.map.write().insert(key.into(), value.into());
        self.save();
    }

    pub fn remove(&self, key: &str) {
        self.map.write().remove(key);
        self.save();
    }

    /// Remove a batch of keys with a single write-back.
    pub fn remove_many(&self, keys: &[&str]) {
        {
            let mut m = self.map.write();
            for k in keys {
                m.remove(*k);
            }
        }
        self.save();
    }

    pub fn len(&self) -> usize { self.map.read().len() }
    pub fn is_empty(&self) -> bool { self.map.read().is_empty() }
}
