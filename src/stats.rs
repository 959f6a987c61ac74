//! Derived statistics for the dashboards: per-status counts, completion
//! percentage, deadline-proximity banding and the encouragement/prime tiers
//! shown on the student statistics page.

use chrono::NaiveDate;

use crate::models::{Statut, Tache};

/// Per-status counts for a list of projects or tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepartitionStatuts {
    pub a_faire: usize,
    pub en_cours: usize,
    pub termine: usize,
}

impl RepartitionStatuts {
    pub fn depuis<I: IntoIterator<Item = Statut>>(statuts: I) -> Self {
        let mut out = Self::default();
        for s in statuts {
            match s {
                Statut::AFaire => out.a_faire += 1,
                Statut::EnCours => out.en_cours += 1,
                Statut::Termine => out.termine += 1,
            }
        }
        out
    }

    pub fn total(&self) -> usize {
        self.a_faire + self.en_cours + self.termine
    }
}

/// Rounded percentage of finished tasks; 0 for an empty list.
pub fn pourcentage_completion(taches: &[Tache]) -> u32 {
    if taches.is_empty() {
        return 0;
    }
    let terminees = taches.iter().filter(|t| t.statut == Statut::Termine).count();
    ((terminees as f64 / taches.len() as f64) * 100.0).round() as u32
}

/// Deadline-proximity band, driving the colored badge next to `date_limite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximiteEcheance {
    Depassee,
    MoinsUneSemaine,
    MoinsUnMois,
    Confortable,
}

impl ProximiteEcheance {
    /// Band a deadline relative to `aujourdhui`. The reference date is a
    /// parameter so views and tests agree on "today".
    pub fn evaluer(date_limite: NaiveDate, aujourdhui: NaiveDate) -> Self {
        let jours = (date_limite - aujourdhui).num_days();
        if jours < 0 {
            ProximiteEcheance::Depassee
        } else if jours < 7 {
            ProximiteEcheance::MoinsUneSemaine
        } else if jours < 30 {
            ProximiteEcheance::MoinsUnMois
        } else {
            ProximiteEcheance::Confortable
        }
    }

    /// Badge classes used by the list views. Overdue and under-a-week share
    /// the red badge.
    pub fn classe_css(&self) -> &'static str {
        match self {
            ProximiteEcheance::Depassee | ProximiteEcheance::MoinsUneSemaine => {
                "bg-red-100 text-red-800"
            }
            ProximiteEcheance::MoinsUnMois => "bg-orange-100 text-orange-800",
            ProximiteEcheance::Confortable => "bg-green-100 text-green-800",
        }
    }
}

/// Encouragement shown under the completion gauge.
pub fn message_encouragement(pourcentage: u32) -> &'static str {
    match pourcentage {
        0 => "C'est le moment de commencer ! Chaque grand projet commence par un premier pas.",
        1..=49 => "Vous avez déjà commencé, continuez comme ça ! La motivation est votre meilleure alliée.",
        50..=89 => "Vous êtes sur la bonne voie ! Plus que quelques efforts et c'est terminé.",
        90..=99 => "Bravo ! Vous êtes presque au bout. La ligne d'arrivée est proche !",
        _ => "Félicitations ! Objectif accompli avec succès 🎉",
    }
}

/// Prime awarded past the completion thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prime {
    /// Amount in FCFA.
    pub montant: u32,
}

pub fn prime_eligibilite(pourcentage: u32) -> Option<Prime> {
    if pourcentage >= 100 {
        Some(Prime { montant: 100_000 })
    } else if pourcentage >= 90 {
        Some(Prime { montant: 30_000 })
    } else {
        None
    }
}
