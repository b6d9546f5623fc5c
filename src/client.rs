//! HTTP client for the assistant backend
//!
//! Two operations: a health probe used by the connectivity monitor, and the
//! chat request itself. Neither retries; callers decide what a failure
//! means for UI state.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request body for `POST /chat`
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Raw response body of `POST /chat`
///
/// Every field is optional on the wire; `error` being present signals an
/// application-level failure even on HTTP 200.
#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    response: Option<String>,
    products_found: Option<u32>,
    classification_result: Option<serde_json::Value>,
    error: Option<String>,
}

/// A successful reply from the chat endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Natural-language response text
    pub response: String,
    /// Number of matched products, when the backend ran a search
    pub products_found: Option<u32>,
    /// Classification of the query, shape defined by the backend
    pub classification: Option<serde_json::Value>,
}

/// Failure modes of a chat request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChatError {
    /// Backend answered with a non-success HTTP status
    #[error("backend returned HTTP {0}")]
    HttpStatus(u16),

    /// The request itself failed (connect, timeout, decode)
    #[error("network error: {0}")]
    Network(String),

    /// HTTP success, but the payload signals an application-level failure
    #[error("backend error: {0}")]
    Application(String),
}

/// Client for the assistant backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: Config,
}

impl BackendClient {
    /// Create a client for the given configuration
    ///
    /// The underlying `reqwest::Client` carries the configured per-request
    /// timeout; there is no retry layer.
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { http, config }
    }

    /// Probe the backend health endpoint
    ///
    /// Any non-success status, network failure, or timeout is uniformly
    /// reported as unreachable.
    pub async fn check_health(&self) -> bool {
        let url = self.config.health_url();
        debug!("Probing backend health: {}", url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Backend reachable at {}", url);
                true
            }
            Ok(response) => {
                warn!(
                    "Health endpoint returned non-success status: {}",
                    response.status()
                );
                false
            }
            Err(e) => {
                debug!("Health probe failed: {}", e);
                false
            }
        }
    }

    /// Send one chat message and decode the reply
    pub async fn send_chat(&self, message: &str) -> Result<ChatReply, ChatError> {
        let url = self.config.chat_url();
        let body = ChatRequest { message };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Chat request to {} failed with status {}", url, status);
            return Err(ChatError::HttpStatus(status.as_u16()));
        }

        let decoded: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if let Some(error) = decoded.error {
            warn!("Backend reported application error: {}", error);
            return Err(ChatError::Application(error));
        }

        let text = match decoded.response {
            Some(text) => text,
            None => {
                return Err(ChatError::Application(
                    "reply carried no response text".to_string(),
                ));
            }
        };

        info!(
            "Chat reply received ({} chars, products_found: {:?})",
            text.len(),
            decoded.products_found
        );

        Ok(ChatReply {
            response: text,
            products_found: decoded.products_found,
            classification: decoded.classification_result,
        })
    }
}
