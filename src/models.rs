//! Wire types for the project/task services and the local form validation
//! the client runs before any network call. Field names follow the server
//! serializers (`nom`, `statut`, `date_limite`, `projet` foreign key).

use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Project/task status choices as stored by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statut {
    #[serde(rename = "À faire")]
    AFaire,
    #[serde(rename = "En cours")]
    EnCours,
    #[serde(rename = "Terminé")]
    Termine,
}

impl Statut {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statut::AFaire => "À faire",
            Statut::EnCours => "En cours",
            Statut::Termine => "Terminé",
        }
    }
}

impl Default for Statut {
    fn default() -> Self { Statut::AFaire }
}

impl std::fmt::Display for Statut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projet {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub statut: Statut,
    /// `YYYY-MM-DD`, nullable on the wire.
    #[serde(default)]
    pub date_limite: Option<NaiveDate>,
}

/// Create/update body for `/projets`.
#[derive(Debug, Clone, Serialize)]
pub struct NouveauProjet {
    pub nom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub statut: Statut,
    pub date_limite: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tache {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub statut: Statut,
    #[serde(default)]
    pub date_limite: Option<NaiveDate>,
    /// Foreign key to the owning project.
    pub projet: i64,
}

/// Create/update body for `/taches`.
#[derive(Debug, Clone, Serialize)]
pub struct NouvelleTache {
    pub nom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub statut: Statut,
    pub date_limite: Option<NaiveDate>,
    pub projet: i64,
}

/// Registration form. Validation mirrors the original two-step form: the
/// personal fields first, then the account fields.
#[derive(Debug, Clone, Default)]
pub struct Inscription {
    pub nom: String,
    pub prenom: String,
    pub username: String,
    pub email: String,
    pub date_naissance: String,
    pub role: String,
    pub password: String,
    pub confirm_password: String,
}

impl Inscription {
    /// Local field validation, run before any network call. Returns an empty
    /// map when the form is acceptable.
    pub fn valider(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        if self.nom.is_empty() {
            errors.insert("nom".into(), "Le nom est requis".into());
        }
        if self.prenom.is_empty() {
            errors.insert("prenom".into(), "Le prénom est requis".into());
        }
        if self.username.is_empty() {
            errors.insert("username".into(), "Le nom d'utilisateur est requis".into());
        }
        if self.email.is_empty() {
            errors.insert("email".into(), "L'email est requis".into());
        }
        if self.date_naissance.is_empty() {
            errors.insert("dateNaissance".into(), "La date de naissance est requise".into());
        }
        if self.role.is_empty() {
            errors.insert("role".into(), "Le rôle est requis".into());
        }
        if self.password.is_empty() {
            errors.insert("password".into(), "Le mot de passe est requis".into());
        }
        if self.password != self.confirm_password {
            errors.insert("confirmPassword".into(), "Les mots de passe ne correspondent pas".into());
        }
        errors
    }

    /// Wire body for `POST inscription/`.
    pub fn corps(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "first_name": self.prenom,
            "last_name": self.nom,
            "email": self.email,
            "date_naissance": self.date_naissance,
            "password": self.password,
            "confirmation_mot_de_passe": self.confirm_password,
            "role": self.role,
        })
    }
}

/// Profile fields returned by `GET utilisateurs/me/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profil {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date_naissance: Option<NaiveDate>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Multipart body for `PUT utilisateurs/update_profile/`. Optional avatar and
/// password-change fields; empty optionals are not sent.
#[derive(Debug, Clone, Default)]
pub struct MiseAJourProfil {
    pub first_name: String,
    pub last_name: String,
    pub date_naissance: Option<String>,
    /// Avatar file content and its filename.
    pub avatar: Option<(String, Vec<u8>)>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl MiseAJourProfil {
    /// Password-change rules from the profile page: a new password requires
    /// the current one and a matching confirmation.
    pub fn valider(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        if let Some(new) = self.new_password.as_deref() {
            if !new.is_empty() {
                if self.current_password.as_deref().unwrap_or("").is_empty() {
                    errors.insert(
                        "current_password".into(),
                        "Vous devez saisir le mot de passe actuel pour le changer".into(),
                    );
                }
                if self.confirm_password.as_deref() != Some(new) {
                    errors.insert(
                        "confirm_password".into(),
                        "Les mots de passe ne correspondent pas".into(),
                    );
                }
            }
        }
        errors
    }
}

/// `{first_name, last_name}` echoed back by the profile update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilMisAJour {
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statut_wire_names() {
        assert_eq!(serde_json::to_string(&Statut::AFaire).unwrap(), "\"À faire\"");
        assert_eq!(serde_json::to_string(&Statut::EnCours).unwrap(), "\"En cours\"");
        assert_eq!(serde_json::to_string(&Statut::Termine).unwrap(), "\"Terminé\"");
        let s: Statut = serde_json::from_str("\"Terminé\"").unwrap();
        assert_eq!(s, Statut::Termine);
    }

    #[test]
    fn tache_body_carries_numeric_projet() {
        let t = NouvelleTache {
            nom: "Relire le rapport".into(),
            description: None,
            statut: Statut::AFaire,
            date_limite: NaiveDate::from_ymd_opt(2025, 6, 30),
            projet: 12,
        };
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["projet"], serde_json::json!(12));
        assert_eq!(v["date_limite"], serde_json::json!("2025-06-30"));
        assert!(v.get("description").is_none());
    }

    #[test]
    fn inscription_validation_reports_missing_fields() {
        let form = Inscription { password: "a".into(), confirm_password: "b".into(), ..Default::default() };
        let errors = form.valider();
        assert_eq!(errors.get("nom").map(String::as_str), Some("Le nom est requis"));
        assert_eq!(
            errors.get("confirmPassword").map(String::as_str),
            Some("Les mots de passe ne correspondent pas")
        );
        assert!(errors.contains_key("role"));
        assert!(errors.contains_key("dateNaissance"));
    }

    #[test]
    fn inscription_validation_accepts_complete_form() {
        let form = Inscription {
            nom: "Diallo".into(),
            prenom: "Fatou".into(),
            username: "fdiallo".into(),
            email: "fatou@example.com".into(),
            date_naissance: "2001-02-03".into(),
            role: "ETUDIANT".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        };
        assert!(form.valider().is_empty());
        let body = form.corps();
        assert_eq!(body["first_name"], serde_json::json!("Fatou"));
        assert_eq!(body["last_name"], serde_json::json!("Diallo"));
    }

    #[test]
    fn profile_update_password_rules() {
        let mut upd = MiseAJourProfil {
            first_name: "Awa".into(),
            last_name: "Ndiaye".into(),
            new_password: Some("nouveau".into()),
            confirm_password: Some("autre".into()),
            ..Default::default()
        };
        let errors = upd.valider();
        assert!(errors.contains_key("current_password"));
        assert!(errors.contains_key("confirm_password"));

        upd.current_password = Some("ancien".into());
        upd.confirm_password = Some("nouveau".into());
        assert!(upd.valider().is_empty());
    }
}
