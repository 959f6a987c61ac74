//! Unified application error model and mapping helpers.
//! This module provides a common error enum used across the REST client, the
//! session/routing layer and the CLI, along with mappers from HTTP statuses
//! and server-side field-error bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// Field-level validation failures, local or returned by the server as
    /// `{"errors": {"field": "message"}}`.
    Invalid { errors: BTreeMap<String, String> },
    /// Bad credentials or missing bearer token. The route guard treats the
    /// missing-token case as a redirect, not a service failure.
    Auth { message: String },
    NotFound { message: String },
    /// Non-2xx response that is not auth/not-found/validation.
    Api { status: u16, message: String },
    /// Transport-level failure (connect, timeout, body decode).
    Network { message: String },
    /// Durable-store file diagnostics. The stores themselves degrade to
    /// no-op on unavailability and never return this.
    Storage { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            AppError::Invalid { errors } => errors
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
            AppError::Auth { message }
            | AppError::NotFound { message }
            | AppError::Api { message, .. }
            | AppError::Network { message }
            | AppError::Storage { message }
            | AppError::Internal { message } => message.clone(),
        }
    }

    pub fn invalid(errors: BTreeMap<String, String>) -> Self { AppError::Invalid { errors } }

    /// Single-field convenience used by local validators.
    pub fn invalid_field<S: Into<String>>(field: S, msg: S) -> Self {
        let mut m = BTreeMap::new();
        m.insert(field.into(), msg.into());
        AppError::Invalid { errors: m }
    }

    pub fn auth<S: Into<String>>(msg: S) -> Self { AppError::Auth { message: msg.into() } }
    pub fn not_found<S: Into<String>>(msg: S) -> Self { AppError::NotFound { message: msg.into() } }
    pub fn api<S: Into<String>>(status: u16, msg: S) -> Self { AppError::Api { status, message: msg.into() } }
    pub fn network<S: Into<String>>(msg: S) -> Self { AppError::Network { message: msg.into() } }
    pub fn storage<S: Into<String>>(msg: S) -> Self { AppError::Storage { message: msg.into() } }
    pub fn internal<S: Into<String>>(msg: S) -> Self { AppError::Internal { message: msg.into() } }

    /// Classify a non-2xx HTTP response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 | 422 => AppError::Api { status, message },
            401 | 403 => AppError::Auth { message },
            404 => AppError::NotFound { message },
            _ => AppError::Api { status, message },
        }
    }

    /// True when the caller should fall back to the login view.
    pub fn is_auth(&self) -> bool { matches!(self, AppError::Auth { .. }) }

    /// Map back to an HTTP status, used by diagnostics.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Invalid { .. } => 400,
            AppError::Auth { .. } => 401,
            AppError::NotFound { .. } => 404,
            AppError::Api { status, .. } => *status,
            AppError::Network { .. } => 503,
            AppError::Storage { .. } => 503,
            AppError::Internal { .. } => 500,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Invalid { .. } => write!(f, "invalid: {}", self.message()),
            AppError::Auth { .. } => write!(f, "auth: {}", self.message()),
            AppError::NotFound { .. } => write!(f, "not_found: {}", self.message()),
            AppError::Api { status, .. } => write!(f, "api[{}]: {}", status, self.message()),
            AppError::Network { .. } => write!(f, "network: {}", self.message()),
            AppError::Storage { .. } => write!(f, "storage: {}", self.message()),
            AppError::Internal { .. } => write!(f, "internal: {}", self.message()),
        }
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network { message: err.to_string() }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(AppError::from_status(401, "no".into()), AppError::Auth { .. }));
        assert!(matches!(AppError::from_status(403, "no".into()), AppError::Auth { .. }));
        assert!(matches!(AppError::from_status(404, "gone".into()), AppError::NotFound { .. }));
        assert!(matches!(AppError::from_status(400, "bad".into()), AppError::Api { status: 400, .. }));
        assert!(matches!(AppError::from_status(500, "boom".into()), AppError::Api { status: 500, .. }));
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(AppError::invalid_field("nom", "Le nom est requis").http_status(), 400);
        assert_eq!(AppError::auth("bad").http_status(), 401);
        assert_eq!(AppError::not_found("missing").http_status(), 404);
        assert_eq!(AppError::network("down").http_status(), 503);
        assert_eq!(AppError::internal("panic").http_status(), 500);
    }

    #[test]
    fn invalid_message_joins_fields() {
        let mut m = BTreeMap::new();
        m.insert("nom".to_string(), "Le nom est requis".to_string());
        m.insert("prenom".to_string(), "Le prénom est requis".to_string());
        let e = AppError::invalid(m);
        assert_eq!(e.message(), "nom: Le nom est requis; prenom: Le prénom est requis");
    }
}
