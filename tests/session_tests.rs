//! Session lifecycle tests: login write-through to both stores, selective
//! profile updates, role re-derivation and logout cleanup.

use cartable::identity::{LoginSuccess, ProfileStore, ProfileUpdate, Role, SessionStore};
use cartable::storage::{keys, DurableStore, SessionArea, TabStore};

fn login_prof() -> LoginSuccess {
    LoginSuccess {
        access: "acc-token".into(),
        refresh: "ref-token".into(),
        role: "PROFESSEUR".into(),
        nom: "Sarr".into(),
        prenom: "Moussa".into(),
    }
}

fn session_over(area: SessionArea, durable: DurableStore) -> SessionStore {
    SessionStore::new(durable, TabStore::new(area))
}

#[test]
fn login_writes_through_to_both_stores() {
    let area = SessionArea::new();
    let durable = DurableStore::in_memory();
    let session = session_over(area.clone(), durable.clone());

    let role = session.apply_login("msarr", &login_prof()).unwrap();
    assert_eq!(role, Role::Professeur);

    // Durable store holds tokens and the last-known identity
    assert_eq!(durable.get(keys::ACCESS_TOKEN).as_deref(), Some("acc-token"));
    assert_eq!(durable.get(keys::REFRESH_TOKEN).as_deref(), Some("ref-token"));
    assert_eq!(durable.get(keys::ROLE).as_deref(), Some("PROFESSEUR"));
    assert_eq!(durable.get(keys::USERNAME).as_deref(), Some("msarr"));

    // Tab store holds the same identity, namespaced for this tab
    let tab = TabStore::new(area);
    assert_eq!(tab.get_item(keys::ROLE).as_deref(), Some("PROFESSEUR"));
    assert_eq!(tab.get_item(keys::NOM).as_deref(), Some("Sarr"));
    assert_eq!(tab.get_item(keys::PRENOM).as_deref(), Some("Moussa"));

    assert!(session.is_authenticated());
    assert_eq!(session.resolve_role(), Some(Role::Professeur));
}

#[test]
fn unknown_role_from_server_is_rejected() {
    let session = session_over(SessionArea::new(), DurableStore::in_memory());
    let mut login = login_prof();
    login.role = "ADMIN".into();
    let err = session.apply_login("x", &login).unwrap_err();
    assert!(err.is_auth());
    // Nothing was stored
    assert!(!session.is_authenticated());
    assert_eq!(session.resolve_role(), None);
}

#[test]
fn two_tabs_can_hold_different_roles() {
    // Shared durable store, two tab areas: two users logged in side by side
    let durable = DurableStore::in_memory();
    let prof = session_over(SessionArea::new(), durable.clone());
    let etu = session_over(SessionArea::new(), durable.clone());

    prof.apply_login("msarr", &login_prof()).unwrap();
    let login_etu = LoginSuccess {
        access: "acc2".into(),
        refresh: "ref2".into(),
        role: "ETUDIANT".into(),
        nom: "Ba".into(),
        prenom: "Aïssatou".into(),
    };
    etu.apply_login("aba", &login_etu).unwrap();

    // The durable store is last-write-wins, but each tab keeps its own role
    assert_eq!(prof.resolve_role(), Some(Role::Professeur));
    assert_eq!(etu.resolve_role(), Some(Role::Etudiant));
    assert_eq!(durable.get(keys::ROLE).as_deref(), Some("ETUDIANT"));
}

#[test]
fn profile_update_is_selective() {
    let area = SessionArea::new();
    let tab = TabStore::new(area.clone());
    tab.set_item(keys::PRENOM, "Y");

    let mut store = ProfileStore::new(TabStore::new(area.clone()), Role::Etudiant);
    assert_eq!(store.profile().prenom, "Y");

    store.update(ProfileUpdate { nom: Some("X".into()), ..Default::default() });
    assert_eq!(store.profile().nom, "X");
    // prenom untouched in memory and in storage
    assert_eq!(store.profile().prenom, "Y");
    assert_eq!(tab.get_item(keys::PRENOM).as_deref(), Some("Y"));
    assert_eq!(tab.get_item(keys::NOM).as_deref(), Some("X"));
}

#[test]
fn empty_fields_are_never_written() {
    let area = SessionArea::new();
    let tab = TabStore::new(area.clone());
    tab.set_item(keys::NOM, "Conservé");

    let mut store = ProfileStore::new(TabStore::new(area), Role::Etudiant);
    store.update(ProfileUpdate {
        nom: Some(String::new()),
        prenom: Some(String::new()),
        ..Default::default()
    });
    assert_eq!(store.profile().nom, "Conservé");
    assert_eq!(tab.get_item(keys::NOM).as_deref(), Some("Conservé"));
}

#[test]
fn profile_defaults_come_from_configuration() {
    // A fresh tab with no stored role renders the configured default
    let etu = ProfileStore::new(TabStore::new(SessionArea::new()), Role::Etudiant);
    assert_eq!(etu.profile().role, Some(Role::Etudiant));
    let prof = ProfileStore::new(TabStore::new(SessionArea::new()), Role::Professeur);
    assert_eq!(prof.profile().role, Some(Role::Professeur));
}

#[test]
fn refresh_rereads_the_tab_store() {
    let area = SessionArea::new();
    let tab = TabStore::new(area.clone());
    let mut store = ProfileStore::new(TabStore::new(area), Role::Etudiant);
    assert_eq!(store.profile().nom, "");

    // Another component (login) writes behind the store's back
    tab.set_item(keys::NOM, "Faye");
    tab.set_item(keys::ROLE, "PROFESSEUR");
    store.refresh();
    assert_eq!(store.profile().nom, "Faye");
    assert_eq!(store.profile().role, Some(Role::Professeur));
}

#[test]
fn logout_clears_both_stores() {
    let area = SessionArea::new();
    let durable = DurableStore::in_memory();
    let session = session_over(area.clone(), durable.clone());
    session.apply_login("msarr", &login_prof()).unwrap();

    session.logout();

    assert!(!session.is_authenticated());
    assert_eq!(session.resolve_role(), None);
    assert!(durable.is_empty());
    let tab = TabStore::new(area.clone());
    assert_eq!(tab.get_item(keys::NOM), None);
    assert_eq!(tab.get_item(keys::USERNAME), None);
    // The raw tab id survives logout; only the namespace is cleared
    assert_eq!(area.get("tabId").as_deref(), Some(tab.tab_id()));
}

#[test]
fn logout_leaves_other_tabs_durable_view_consistent() {
    // Logging out in one tab revokes the shared token for every tab
    let durable = DurableStore::in_memory();
    let tab_a = session_over(SessionArea::new(), durable.clone());
    let tab_b = session_over(SessionArea::new(), durable.clone());
    tab_a.apply_login("msarr", &login_prof()).unwrap();

    tab_a.logout();
    assert!(!tab_b.is_authenticated());
}
