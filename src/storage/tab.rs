use base64::Engine;
use tracing::debug;

use super::SessionArea;

/// Raw key under which the tab identifier itself is persisted.
const TAB_ID_KEY: &str = "tabId";

fn gen_tab_id() -> String {
    // Time-derived prefix keeps ids ordered and debuggable; the random
    // suffix avoids two tabs opened in the same millisecond sharing a
    // namespace.
    let millis = chrono::Utc::now().timestamp_millis();
    let mut buf = [0u8; 6];
    let _ = getrandom::getrandom(&mut buf);
    let suffix = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf);
    format!("{}-{}", millis, suffix)
}

/// Key-value store namespaced per browser tab.
///
/// On first use in a tab the identifier is generated and persisted into the
/// raw session area; later constructions over the same area reuse it. The
/// identifier is read once and cached for the life of this handle, so all
/// operations stay synchronous and strictly ordered within the tab.
#[derive(Clone)]
pub struct TabStore {
    area: SessionArea,
    tab_id: String,
}

impl TabStore {
    pub fn new(area: SessionArea) -> Self {
        let tab_id = match area.get(TAB_ID_KEY) {
            Some(id) => id,
            None => {
                let id = gen_tab_id();
                // No-op when the area is unavailable; the id still scopes
                // this handle for the (non-persistent) tab lifetime.
                area.set(TAB_ID_KEY, id.clone());
                debug!(target: "cartable", "tab id generated: {}", id);
                id
            }
        };
        Self { area, tab_id }
    }

    pub fn tab_id(&self) -> &str { &self.tab_id }

    fn scoped(&self, key: &str) -> String {
        format!("{}_{}", self.tab_id, key)
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) {
        self.area.set(self.scoped(key), value);
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.area.get(&self.scoped(key))
    }

    pub fn remove_item(&self, key: &str) {
        self.area.remove(&self.scoped(key));
    }

    /// Remove only this tab's namespaced keys, leaving other tabs' keys and
    /// unrelated raw keys (including the tab id itself) untouched.
    pub fn clear(&self) {
        let prefix = format!("{}_", self.tab_id);
        for key in self.area.keys() {
            if key.starts_with(&prefix) {
                self.area.remove(&key);
            }
        }
    }
}
