//! Error taxonomy of `/api/chat` and its mapping to HTTP.
//!
//! | kind          | status | body                                         |
//! |---------------|--------|----------------------------------------------|
//! | Validation    | 400    | `Message is required`                        |
//! | Configuration | 500    | the `ConfigError` message                    |
//! | ProviderCall  | 500    | `Azure OpenAI call failed: <kind>`           |
//!
//! Only these messages reach the client. Provider payloads and transport details stay in logs.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;
use crate::models::api::ErrorResponse;
use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is required")]
    Validation,
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("Azure OpenAI call failed: {0}")]
    ProviderCall(#[from] ProviderError),
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::ProviderCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation => "Message is required".to_string(),
            Self::Configuration(e) => e.to_string(),
            Self::ProviderCall(e) => format!("Azure OpenAI call failed: {}", e.kind()),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation => {}
            Self::Configuration(ConfigError::ClientInit { kind, detail }) => {
                tracing::error!(kind = %kind, detail = %detail, "provider client initialization failed");
            }
            Self::Configuration(e) => tracing::warn!(error = %e, "provider configuration incomplete"),
            Self::ProviderCall(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Azure OpenAI call failed");
            }
        }
        error_response(self.status_code(), &self.public_message())
    }
}

/// Build a JSON error response `{"error": msg}` with the given HTTP status.
pub fn error_response(status: StatusCode, msg: &str) -> Response {
    let body = ErrorResponse {
        error: msg.to_string(),
    };
    (status, Json(body)).into_response()
}
