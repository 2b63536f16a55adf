//! Completion provider seam and the Azure OpenAI implementation.
//!
//! The handler only sees [`ProviderFactory`] and [`CompletionProvider`]; tests swap in
//! stubs, production uses [`AzureProviderFactory`].

use std::sync::Arc;

use async_trait::async_trait;
use http::{HeaderValue, StatusCode};
use reqwest::Url;
use thiserror::Error;

use crate::config::{ConfigError, ProviderConfig};
use crate::models::chat::{ChatCompletionRequest, ChatCompletionResponse};

/// Failure of a single completion call.
///
/// `Display` carries the full detail and is for logs only; clients see [`ProviderError::kind`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("connection to provider failed: {0}")]
    Connection(String),
    #[error("provider request timed out: {0}")]
    Timeout(String),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("could not decode provider response: {0}")]
    Decode(String),
    #[error("provider response contained no choices")]
    NoChoices,
}

impl ProviderError {
    /// Short, stable tag safe to show to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(_) => "APIConnectionError",
            Self::Timeout(_) => "APITimeoutError",
            Self::Status { status, .. } => match status.as_u16() {
                400 => "BadRequestError",
                401 => "AuthenticationError",
                403 => "PermissionDeniedError",
                404 => "NotFoundError",
                422 => "UnprocessableEntityError",
                429 => "RateLimitError",
                s if s >= 500 => "InternalServerError",
                _ => "APIStatusError",
            },
            Self::Decode(_) => "APIResponseValidationError",
            Self::NoChoices => "NoChoicesError",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Connection(e.to_string())
        }
    }
}

/// A single chat completion call: one request, one response, no retries.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError>;
}

/// Builds a provider for a freshly resolved configuration.
pub trait ProviderFactory: Send + Sync {
    fn build(&self, config: &ProviderConfig) -> Result<Arc<dyn CompletionProvider>, ConfigError>;
}

/// Client for `{endpoint}/openai/deployments/{deployment}/chat/completions`.
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    url: Url,
    api_key: HeaderValue,
}

fn init_error(kind: &'static str, detail: impl Into<String>) -> ConfigError {
    ConfigError::ClientInit {
        kind,
        detail: detail.into(),
    }
}

impl AzureOpenAiClient {
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Result<Self, ConfigError> {
        let mut url = Url::parse(config.endpoint.trim())
            .map_err(|e| init_error("InvalidEndpointError", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(init_error(
                "InvalidEndpointError",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        url.path_segments_mut()
            .map_err(|_| init_error("InvalidEndpointError", "endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend([
                "openai",
                "deployments",
                config.deployment.as_str(),
                "chat",
                "completions",
            ]);
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("api-version", &config.api_version);

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| init_error("InvalidHeaderError", e.to_string()))?;
        api_key.set_sensitive(true);

        Ok(Self { http, url, api_key })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl CompletionProvider for AzureOpenAiClient {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        tracing::debug!(url = %self.url, model = %request.model, "sending chat completion");
        let resp = self
            .http
            .post(self.url.clone())
            .header("api-key", self.api_key.clone())
            .header(http::header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

/// Production factory: one shared `reqwest::Client`, a fresh [`AzureOpenAiClient`] per request.
#[derive(Clone)]
pub struct AzureProviderFactory {
    http: reqwest::Client,
}

impl AzureProviderFactory {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl ProviderFactory for AzureProviderFactory {
    fn build(&self, config: &ProviderConfig) -> Result<Arc<dyn CompletionProvider>, ConfigError> {
        Ok(Arc::new(AzureOpenAiClient::new(self.http.clone(), config)?))
    }
}
