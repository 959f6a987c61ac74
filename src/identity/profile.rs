use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{keys, TabStore};
use super::Role;

/// Identity fields cached per tab for display in the navigation components.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    pub role: Option<Role>,
}

/// Partial update merged into the in-memory profile. Only present, non-empty
/// fields are written through to the tab store.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub role: Option<Role>,
}

/// Per-tab state container exposing the current profile and a merge-update
/// operation. One store serves both roles; the role a fresh tab renders with
/// comes from the stack configuration, not from duplicated code paths.
pub struct ProfileStore {
    tab: TabStore,
    default_role: Role,
    profile: UserProfile,
}

impl ProfileStore {
    /// Load the profile from the tab store; missing fields start empty and a
    /// missing role falls back to the configured default. Callers overwrite
    /// the role as soon as the true identity is known (login, mount effect).
    pub fn new(tab: TabStore, default_role: Role) -> Self {
        let profile = Self::read_profile(&tab, default_role);
        Self { tab, default_role, profile }
    }

    fn read_profile(tab: &TabStore, default_role: Role) -> UserProfile {
        let role = tab
            .get_item(keys::ROLE)
            .and_then(|s| Role::parse(&s))
            .unwrap_or(default_role);
        UserProfile {
            nom: tab.get_item(keys::NOM).unwrap_or_default(),
            prenom: tab.get_item(keys::PRENOM).unwrap_or_default(),
            role: Some(role),
        }
    }

    pub fn profile(&self) -> &UserProfile { &self.profile }

    pub fn default_role(&self) -> Role { self.default_role }

    /// Re-read the tab store, as each navigation component does on mount.
    pub fn refresh(&mut self) {
        self.profile = Self::read_profile(&self.tab, self.default_role);
    }

    /// Merge the partial fields into the in-memory profile and write through
    /// only the non-empty ones. Updating `nom` alone must not erase a
    /// previously stored `prenom`.
    pub fn update(&mut self, upd: ProfileUpdate) {
        if let Some(nom) = upd.nom {
            if !nom.is_empty() {
                self.tab.set_item(keys::NOM, nom.clone());
                self.profile.nom = nom;
            }
        }
        if let Some(prenom) = upd.prenom {
            if !prenom.is_empty() {
                self.tab.set_item(keys::PRENOM, prenom.clone());
                self.profile.prenom = prenom;
            }
        }
        if let Some(role) = upd.role {
            self.tab.set_item(keys::ROLE, role.as_str());
            self.profile.role = Some(role);
        }
        debug!(target: "cartable", "profile updated: {} {}", self.profile.prenom, self.profile.nom);
    }
}
