//! Backend endpoint configuration

use serde::{Deserialize, Serialize};

/// Default backend base URL (local assistant service)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend connection configuration
///
/// The base URL is a fixed configuration value for the lifetime of the
/// client; there is no runtime endpoint switching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the assistant backend (no trailing slash)
    pub base_url: String,
    /// Timeout applied to every outbound request, in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Build a configuration from the environment, falling back to defaults
    ///
    /// Reads `CHATTERM_BACKEND_URL` and `CHATTERM_TIMEOUT_SECS`. Invalid or
    /// missing values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CHATTERM_BACKEND_URL") {
            let trimmed = url.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                config.base_url = trimmed.to_string();
            }
        }

        if let Ok(secs) = std::env::var("CHATTERM_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.trim().parse::<u64>() {
                if parsed > 0 {
                    config.request_timeout_secs = parsed;
                }
            }
        }

        config
    }

    /// URL of the health endpoint
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// URL of the chat endpoint
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}
