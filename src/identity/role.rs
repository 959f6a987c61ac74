use serde::{Deserialize, Serialize};

/// Closed role variant driving which navigation/state-container stack is
/// active. The wire strings are the ones the authentication service returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ETUDIANT")]
    Etudiant,
    #[serde(rename = "PROFESSEUR")]
    Professeur,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Etudiant => "ETUDIANT",
            Role::Professeur => "PROFESSEUR",
        }
    }

    /// Strict parse of the wire string. Anything else (including a missing
    /// value) is an explicit "role unknown" for the caller to handle; this
    /// function never guesses a default.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "ETUDIANT" => Some(Role::Etudiant),
            "PROFESSEUR" => Some(Role::Professeur),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_strict() {
        assert_eq!(Role::parse("ETUDIANT"), Some(Role::Etudiant));
        assert_eq!(Role::parse("PROFESSEUR"), Some(Role::Professeur));
        assert_eq!(Role::parse("professeur"), None);
        assert_eq!(Role::parse("ADMIN"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn wire_names_roundtrip() {
        let s = serde_json::to_string(&Role::Professeur).unwrap();
        assert_eq!(s, "\"PROFESSEUR\"");
        let r: Role = serde_json::from_str("\"ETUDIANT\"").unwrap();
        assert_eq!(r, Role::Etudiant);
    }
}
