//! Role-derived view routing: the route guard and the selection of the
//! Student/Professor presentation stack for every protected view.
//!
//! The guard re-checks the durable token on each navigation. Role
//! resolution happens in exactly one place (`Stack::for_role`) so the three
//! call sites of the original router cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::identity::{ProfileStore, Role, SessionStore};
use crate::storage::TabStore;

/// Navigable routes of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Accueil,
    Login,
    Inscription,
    Etudiant,
    Professeur,
    Profil,
    Projets,
    Taches,
    Statistiques,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "" | "/" => Some(Route::Accueil),
            "/login" => Some(Route::Login),
            "/inscription" => Some(Route::Inscription),
            "/etudiant" => Some(Route::Etudiant),
            "/professeur" => Some(Route::Professeur),
            "/profil" => Some(Route::Profil),
            "/projets" => Some(Route::Projets),
            "/taches" => Some(Route::Taches),
            "/statistiques" => Some(Route::Statistiques),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Accueil => "/",
            Route::Login => "/login",
            Route::Inscription => "/inscription",
            Route::Etudiant => "/etudiant",
            Route::Professeur => "/professeur",
            Route::Profil => "/profil",
            Route::Projets => "/projets",
            Route::Taches => "/taches",
            Route::Statistiques => "/statistiques",
        }
    }

    /// Landing route after a successful login for the given role.
    pub fn landing(role: Role) -> Route {
        match role {
            Role::Etudiant => Route::Etudiant,
            Role::Professeur => Route::Professeur,
        }
    }
}

/// Which navigation component + state container wraps a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    Etudiant,
    Professeur,
}

impl Stack {
    /// The single role-resolution point. Only an explicit professor role
    /// selects the professor stack; a student, unknown or absent role
    /// renders the student stack.
    pub fn for_role(role: Option<Role>) -> Stack {
        match role {
            Some(Role::Professeur) => Stack::Professeur,
            _ => Stack::Etudiant,
        }
    }

    /// Default role this stack seeds a fresh tab's profile with.
    pub fn default_role(&self) -> Role {
        match self {
            Stack::Etudiant => Role::Etudiant,
            Stack::Professeur => Role::Professeur,
        }
    }

    /// Build the state container for this stack over the tab's storage.
    pub fn profile_store(&self, tab: TabStore) -> ProfileStore {
        ProfileStore::new(tab, self.default_role())
    }
}

/// The page mounted inside the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Accueil,
    Connexion,
    Inscription,
    TableauEtudiant,
    TableauProfesseur,
    Profil,
    Projets,
    Taches,
    StatistiquesEtudiant,
    StatistiquesProfesseur,
}

/// Outcome of resolving a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Public(View),
    /// Missing access token on a protected route.
    RedirectToLogin,
    Protected { stack: Stack, view: View },
}

/// Resolve a navigation against the current session. The token check runs on
/// every call; the stack comes from the tab-scoped role except on the two
/// dashboard routes, where the route itself fixes the stack as in the
/// original router.
pub fn resolve(route: Route, session: &SessionStore) -> Resolution {
    match route {
        Route::Accueil => return Resolution::Public(View::Accueil),
        Route::Login => return Resolution::Public(View::Connexion),
        Route::Inscription => return Resolution::Public(View::Inscription),
        _ => {}
    }
    if !session.is_authenticated() {
        return Resolution::RedirectToLogin;
    }
    let stack = Stack::for_role(session.resolve_role());
    let (stack, view) = match route {
        Route::Etudiant => (Stack::Etudiant, View::TableauEtudiant),
        Route::Professeur => (Stack::Professeur, View::TableauProfesseur),
        Route::Profil => (stack, View::Profil),
        Route::Projets => (stack, View::Projets),
        Route::Taches => (stack, View::Taches),
        Route::Statistiques => match stack {
            Stack::Etudiant => (stack, View::StatistiquesEtudiant),
            Stack::Professeur => (stack, View::StatistiquesProfesseur),
        },
        Route::Accueil | Route::Login | Route::Inscription => unreachable!(),
    };
    Resolution::Protected { stack, view }
}

/// Header line shown at the top of the list views.
pub fn connected_banner(stack: Stack) -> String {
    format!("Connecté en tant que {}", stack.default_role().as_str())
}
