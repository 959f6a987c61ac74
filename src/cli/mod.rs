//! Interactive command loop exercising the client core: login/logout, route
//! resolution, project/task listings and the statistics summary.

mod table;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::identity::SessionStore;
use crate::models::{Projet, Tache};
use crate::routing::{self, Resolution, Route};
use crate::stats;
use crate::storage::{DurableStore, SessionArea, TabStore};

const HELP: &str = "\
commands:
  login <username> <password>   authenticate and open the session
  logout                        clear session and tab storage
  go <path>                     resolve a route (/etudiant, /projets, ...)
  projets                       list projects
  taches                        list tasks
  stats                         completion summary
  profil                        show the authenticated profile
  help                          this text
  quit";

pub async fn run(config: ClientConfig) -> Result<()> {
    let durable = match config.state_file.as_ref() {
        Some(p) => DurableStore::open(p),
        None => DurableStore::in_memory(),
    };
    // One process == one tab context.
    let tab = TabStore::new(SessionArea::new());
    let session = SessionStore::new(durable.clone(), tab);
    let api = ApiClient::new(&config, durable);

    info!(target: "cartable", "interactive client, api={}", config.base_url);
    println!("cartable — tape 'help' pour la liste des commandes");

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline("cartable> ") {
            Ok(l) => l,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rl.add_history_entry(line).ok();
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        match cmd {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "login" => {
                let (user, pass) = (parts.next(), parts.next());
                match (user, pass) {
                    (Some(u), Some(p)) => do_login(&api, &session, u, p).await,
                    _ => println!("usage: login <username> <password>"),
                }
            }
            "logout" => {
                session.logout();
                println!("déconnecté");
            }
            "go" => match parts.next() {
                Some(path) => do_go(&session, path),
                None => println!("usage: go <path>"),
            },
            "projets" => match api.projets().await {
                Ok(projets) => print_projets(&projets),
                Err(e) => println!("erreur: {}", e),
            },
            "taches" => match api.taches().await {
                Ok(taches) => print_taches(&taches),
                Err(e) => println!("erreur: {}", e),
            },
            "stats" => match api.taches().await {
                Ok(taches) => print_stats(&taches),
                Err(e) => println!("erreur: {}", e),
            },
            "profil" => match api.profil().await {
                Ok(p) => println!("{} {} <{}> ({})", p.first_name, p.last_name, p.email,
                                  p.role.as_deref().unwrap_or("?")),
                Err(e) => println!("erreur: {}", e),
            },
            other => println!("commande inconnue: {} (essayez 'help')", other),
        }
    }
    Ok(())
}

async fn do_login(api: &ApiClient, session: &SessionStore, username: &str, password: &str) {
    match api.login(username, password).await {
        Ok(success) => match session.apply_login(username, &success) {
            Ok(role) => {
                println!("connecté; redirection vers {}", Route::landing(role).path());
            }
            Err(e) => println!("{}", e.message()),
        },
        Err(e) => println!("{}", e.message()),
    }
}

fn do_go(session: &SessionStore, path: &str) {
    let Some(route) = Route::from_path(path) else {
        println!("route inconnue: {}", path);
        return;
    };
    match routing::resolve(route, session) {
        Resolution::Public(view) => println!("vue publique: {:?}", view),
        Resolution::RedirectToLogin => println!("redirection vers {}", Route::Login.path()),
        Resolution::Protected { stack, view } => {
            println!("{}", routing::connected_banner(stack));
            println!("vue: {:?} (barre {:?})", view, stack);
        }
    }
}

fn print_projets(projets: &[Projet]) {
    let today = chrono::Utc::now().date_naive();
    let cols = ["id", "nom", "statut", "date_limite", "échéance"];
    let rows: Vec<Vec<String>> = projets
        .iter()
        .map(|p| {
            let (date, bande) = match p.date_limite {
                Some(d) => (
                    d.to_string(),
                    format!("{:?}", stats::ProximiteEcheance::evaluer(d, today)),
                ),
                None => ("Non définie".to_string(), String::new()),
            };
            vec![p.id.to_string(), p.nom.clone(), p.statut.to_string(), date, bande]
        })
        .collect();
    table::print_table(&cols, &rows);
}

fn print_taches(taches: &[Tache]) {
    let cols = ["id", "nom", "statut", "date_limite", "projet"];
    let rows: Vec<Vec<String>> = taches
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.nom.clone(),
                t.statut.to_string(),
                t.date_limite.map(|d| d.to_string()).unwrap_or_else(|| "Non définie".into()),
                t.projet.to_string(),
            ]
        })
        .collect();
    table::print_table(&cols, &rows);
}

fn print_stats(taches: &[Tache]) {
    let repartition = stats::RepartitionStatuts::depuis(taches.iter().map(|t| t.statut));
    let pct = stats::pourcentage_completion(taches);
    println!(
        "tâches: {} (à faire {}, en cours {}, terminées {})",
        repartition.total(),
        repartition.a_faire,
        repartition.en_cours,
        repartition.termine
    );
    println!("complétion: {}%", pct);
    println!("{}", stats::message_encouragement(pct));
    if let Some(prime) = stats::prime_eligibilite(pct) {
        println!("prime: {} FCFA", prime.montant);
    }
}
