//!
//! cartable storage module
//! -----------------------
//! This module implements the two client-side stores the tracker relies on:
//!
//! - `TabStore`: a key-value facade over a per-tab ephemeral `SessionArea`,
//!   namespacing every logical key by a tab identifier generated on first
//!   use. Two tabs never observe each other's values for the same logical
//!   field, and `clear()` removes only the current tab's namespace.
//! - `DurableStore`: the cross-tab store shared by every tab of the browser
//!   profile, holding the bearer token pair and the last-known profile
//!   fields. Optionally written through to a JSON file.
//!
//! Failure semantics: an unavailable session area (storage disabled by the
//! browser or privacy mode) degrades every operation to a silent no-op, and
//! durable file writes that fail are logged and ignored. Nothing in this
//! module returns an error to its caller.

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;

mod tab;
mod durable;

pub use tab::TabStore;
pub use durable::DurableStore;

/// Durable-store keys written at login and removed at logout.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const ROLE: &str = "role";
    pub const USERNAME: &str = "username";
    pub const NOM: &str = "nom";
    pub const PRENOM: &str = "prenom";
}

/// Raw per-tab ephemeral storage area (the sessionStorage analog).
///
/// Cloning shares the underlying map, so one `SessionArea` value models one
/// browser tab; construct a second area to simulate a second tab. The
/// `unavailable()` constructor models storage disabled by the browser:
/// every operation no-ops and reads return `None`.
#[derive(Clone)]
pub struct SessionArea {
    inner: Option<Arc<RwLock<HashMap<String, String>>>>,
}

impl SessionArea {
    pub fn new() -> Self {
        Self { inner: Some(Arc::new(RwLock::new(HashMap::new()))) }
    }

    /// Storage disabled: all operations degrade to no-op.
    pub fn unavailable() -> Self {
        Self { inner: None }
    }

    pub fn is_available(&self) -> bool { self.inner.is_some() }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.read().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Some(m) = self.inner.as_ref() {
            m.write().insert(key.into(), value.into());
        }
    }

    pub fn remove(&self, key: &str) {
        if let Some(m) = self.inner.as_ref() {
            m.write().remove(key);
        }
    }

    /// Snapshot of all raw keys currently in the area.
    pub fn keys(&self) -> Vec<String> {
        match self.inner.as_ref() {
            Some(m) => m.read().keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map(|m| m.read().len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Default for SessionArea {
    fn default() -> Self { Self::new() }
}
