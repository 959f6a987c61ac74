//! Route guard and stack selection tests, including the end-to-end login
//! and logout scenarios.

use cartable::identity::{LoginSuccess, Role, SessionStore};
use cartable::routing::{connected_banner, resolve, Resolution, Route, Stack, View};
use cartable::storage::{keys, DurableStore, SessionArea, TabStore};

fn anonymous_session() -> SessionStore {
    SessionStore::new(DurableStore::in_memory(), TabStore::new(SessionArea::new()))
}

fn authenticated_session(role: Option<&str>) -> SessionStore {
    let durable = DurableStore::in_memory();
    durable.set(keys::ACCESS_TOKEN, "tok");
    let tab = TabStore::new(SessionArea::new());
    if let Some(r) = role {
        tab.set_item(keys::ROLE, r);
    }
    SessionStore::new(durable, tab)
}

#[test]
fn public_routes_skip_the_guard() {
    let session = anonymous_session();
    assert_eq!(resolve(Route::Accueil, &session), Resolution::Public(View::Accueil));
    assert_eq!(resolve(Route::Login, &session), Resolution::Public(View::Connexion));
    assert_eq!(resolve(Route::Inscription, &session), Resolution::Public(View::Inscription));
}

#[test]
fn missing_token_redirects_every_protected_route() {
    let session = anonymous_session();
    for route in [
        Route::Etudiant,
        Route::Professeur,
        Route::Profil,
        Route::Projets,
        Route::Taches,
        Route::Statistiques,
    ] {
        assert_eq!(resolve(route, &session), Resolution::RedirectToLogin, "route {:?}", route);
    }
}

#[test]
fn guard_is_reevaluated_on_every_navigation() {
    let session = authenticated_session(Some("PROFESSEUR"));
    assert!(matches!(resolve(Route::Projets, &session), Resolution::Protected { .. }));
    // Token removed between navigations (another tab logged out)
    session.durable().remove(keys::ACCESS_TOKEN);
    assert_eq!(resolve(Route::Projets, &session), Resolution::RedirectToLogin);
}

#[test]
fn professor_role_mounts_professor_stack() {
    let session = authenticated_session(Some("PROFESSEUR"));
    for (route, view) in [
        (Route::Profil, View::Profil),
        (Route::Projets, View::Projets),
        (Route::Taches, View::Taches),
    ] {
        assert_eq!(
            resolve(route, &session),
            Resolution::Protected { stack: Stack::Professeur, view },
        );
    }
    assert_eq!(
        resolve(Route::Statistiques, &session),
        Resolution::Protected { stack: Stack::Professeur, view: View::StatistiquesProfesseur },
    );
}

#[test]
fn student_or_missing_role_mounts_student_stack() {
    for role in [Some("ETUDIANT"), None, Some("INCONNU")] {
        let session = authenticated_session(role);
        assert_eq!(
            resolve(Route::Projets, &session),
            Resolution::Protected { stack: Stack::Etudiant, view: View::Projets },
            "role {:?}",
            role
        );
        assert_eq!(
            resolve(Route::Statistiques, &session),
            Resolution::Protected { stack: Stack::Etudiant, view: View::StatistiquesEtudiant },
            "role {:?}",
            role
        );
    }
}

#[test]
fn dashboard_routes_fix_their_stack() {
    // The dashboards are wrapped by their own provider regardless of role
    let session = authenticated_session(Some("PROFESSEUR"));
    assert_eq!(
        resolve(Route::Etudiant, &session),
        Resolution::Protected { stack: Stack::Etudiant, view: View::TableauEtudiant },
    );
    assert_eq!(
        resolve(Route::Professeur, &session),
        Resolution::Protected { stack: Stack::Professeur, view: View::TableauProfesseur },
    );
}

#[test]
fn stack_profile_store_seeds_its_default_role() {
    let tab = TabStore::new(SessionArea::new());
    let store = Stack::Professeur.profile_store(tab);
    assert_eq!(store.profile().role, Some(Role::Professeur));
}

#[test]
fn login_then_navigate_renders_professor_banner() {
    // End-to-end: valid professor login, then /projets
    let area = SessionArea::new();
    let durable = DurableStore::in_memory();
    let session = SessionStore::new(durable.clone(), TabStore::new(area.clone()));
    let login = LoginSuccess {
        access: "acc".into(),
        refresh: "ref".into(),
        role: "PROFESSEUR".into(),
        nom: "Sow".into(),
        prenom: "Omar".into(),
    };
    session.apply_login("osow", &login).unwrap();

    // Both stores contain the role
    assert_eq!(durable.get(keys::ROLE).as_deref(), Some("PROFESSEUR"));
    assert_eq!(TabStore::new(area).get_item(keys::ROLE).as_deref(), Some("PROFESSEUR"));

    match resolve(Route::Projets, &session) {
        Resolution::Protected { stack, view } => {
            assert_eq!(stack, Stack::Professeur);
            assert_eq!(view, View::Projets);
            assert_eq!(connected_banner(stack), "Connecté en tant que PROFESSEUR");
        }
        other => panic!("expected protected resolution, got {:?}", other),
    }
}

#[test]
fn logout_then_navigate_redirects_to_login() {
    let session = authenticated_session(Some("ETUDIANT"));
    assert!(matches!(resolve(Route::Etudiant, &session), Resolution::Protected { .. }));

    session.logout();
    assert_eq!(resolve(Route::Etudiant, &session), Resolution::RedirectToLogin);
    assert!(session.durable().is_empty());
}
