use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::storage::{keys, DurableStore, TabStore};
use super::Role;

/// Payload of a successful `POST token/` call.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginSuccess {
    pub access: String,
    pub refresh: String,
    /// Raw role string as returned by the server; validated in
    /// `apply_login` rather than trusted verbatim.
    pub role: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
}

/// Per-tab session object owning the durable cross-tab store and the
/// tab-scoped store. Constructed once per tab context and passed to every
/// consumer; there are no ambient globals.
///
/// Conceptual state machine per tab: Anonymous -> Authenticated(role) ->
/// Anonymous (logout or missing token). The role is re-derived from the tab
/// store on each resolution, never cached here.
#[derive(Clone)]
pub struct SessionStore {
    durable: DurableStore,
    tab: TabStore,
}

impl SessionStore {
    pub fn new(durable: DurableStore, tab: TabStore) -> Self {
        Self { durable, tab }
    }

    pub fn durable(&self) -> &DurableStore { &self.durable }
    pub fn tab(&self) -> &TabStore { &self.tab }

    /// Record a successful login: tokens go to the durable store only,
    /// identity fields are written through to both stores so other tabs see
    /// the last login while this tab keeps its own view.
    pub fn apply_login(&self, username: &str, login: &LoginSuccess) -> AppResult<Role> {
        let role = Role::parse(&login.role)
            .ok_or_else(|| AppError::auth("Rôle non reconnu"))?;

        self.durable.set(keys::ACCESS_TOKEN, login.access.clone());
        self.durable.set(keys::REFRESH_TOKEN, login.refresh.clone());
        self.durable.set(keys::ROLE, role.as_str());
        self.durable.set(keys::USERNAME, username);
        self.durable.set(keys::NOM, login.nom.clone());
        self.durable.set(keys::PRENOM, login.prenom.clone());

        self.tab.set_item(keys::ROLE, role.as_str());
        self.tab.set_item(keys::USERNAME, username);
        self.tab.set_item(keys::NOM, login.nom.clone());
        self.tab.set_item(keys::PRENOM, login.prenom.clone());

        debug!(target: "cartable", "session.login user={} role={}", username, role);
        Ok(role)
    }

    /// Route-guard check: presence of the access token in the durable store,
    /// re-evaluated on every navigation rather than cached.
    pub fn is_authenticated(&self) -> bool {
        self.durable.get(keys::ACCESS_TOKEN).is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.durable.get(keys::ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.durable.get(keys::REFRESH_TOKEN)
    }

    /// Role as stored for this tab. Idempotent and side-effect free so the
    /// router, the profile view and the list views can all repeat it; a
    /// missing or unparseable value is an explicit `None`, never a guess.
    pub fn resolve_role(&self) -> Option<Role> {
        self.tab.get_item(keys::ROLE).and_then(|s| Role::parse(&s))
    }

    /// Clear both the durable credential/profile keys and the whole
    /// tab-scoped namespace. Callable from any protected view; leaves no
    /// stale identity fields behind.
    pub fn logout(&self) {
        self.durable.remove_many(&[
            keys::ACCESS_TOKEN,
            keys::REFRESH_TOKEN,
            keys::ROLE,
            keys::USERNAME,
            keys::NOM,
            keys::PRENOM,
        ]);
        self.tab.clear();
        debug!(target: "cartable", "session.logout tab={}", self.tab.tab_id());
    }
}
