//! Environment-driven client configuration.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the tracker API, with trailing slash.
    pub base_url: String,
    /// Optional file backing the durable cross-tab store.
    pub state_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut base_url = std::env::var("CARTABLE_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let state_file = std::env::var("CARTABLE_STATE_FILE").ok().map(PathBuf::from);
        Self { base_url, state_file }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), state_file: None }
    }
}
