//! Azure OpenAI provider configuration.
//!
//! Configuration is resolved from an [`EnvLookup`] on every request, so a changed
//! environment variable takes effect on the next call without a restart.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
pub const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
pub const API_VERSION_VAR: &str = "AZURE_OPENAI_API_VERSION";
pub const DEPLOYMENT_VAR: &str = "AZURE_OPENAI_DEPLOYMENT";

pub const DEFAULT_API_VERSION: &str = "2024-12-01-preview";

/// Source of configuration values. Empty values count as absent.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lookup backed by the process environment.
pub fn process_env() -> EnvLookup {
    Arc::new(|key| std::env::var(key).ok())
}

/// Lookup backed by a fixed map (tests, embedding).
pub fn map_env<I, K, V>(vars: I) -> EnvLookup
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Arc::new(move |key| map.get(key).cloned())
}

fn non_empty(env: &EnvLookup, key: &str) -> Option<String> {
    env(key).filter(|v| !v.is_empty())
}

/// Configuration failures. The `Display` text is the exact client-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing AZURE_OPENAI_DEPLOYMENT")]
    MissingDeployment,
    #[error("Missing AZURE_OPENAI_ENDPOINT")]
    MissingEndpoint,
    #[error("Missing AZURE_OPENAI_API_KEY")]
    MissingApiKey,
    /// The provider client could not be built; `kind` is a short tag, `detail` is log-only.
    #[error("Client initialization failed: {kind}")]
    ClientInit { kind: &'static str, detail: String },
}

/// Everything needed to reach one Azure OpenAI deployment.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}

impl ProviderConfig {
    /// Resolve the deployment identifier on its own. Checked before the client settings.
    pub fn resolve_deployment(env: &EnvLookup) -> Result<String, ConfigError> {
        non_empty(env, DEPLOYMENT_VAR).ok_or(ConfigError::MissingDeployment)
    }

    /// Resolve the full configuration.
    ///
    /// Order: deployment, endpoint, api key. The api version falls back to
    /// [`DEFAULT_API_VERSION`].
    pub fn resolve(env: &EnvLookup) -> Result<Self, ConfigError> {
        let deployment = Self::resolve_deployment(env)?;
        let endpoint = non_empty(env, ENDPOINT_VAR).ok_or(ConfigError::MissingEndpoint)?;
        let api_key = non_empty(env, API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let api_version =
            non_empty(env, API_VERSION_VAR).unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        Ok(Self {
            endpoint,
            api_key,
            api_version,
            deployment,
        })
    }
}

/// Presence report for the admin page. Secret values are never carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvStatus {
    pub rows: Vec<(&'static str, String)>,
}

impl EnvStatus {
    pub fn collect(env: &EnvLookup) -> Self {
        let presence = |key: &str| {
            if non_empty(env, key).is_some() {
                "✅ set".to_string()
            } else {
                "❌ missing".to_string()
            }
        };
        let version = non_empty(env, API_VERSION_VAR)
            .unwrap_or_else(|| format!("(default: {DEFAULT_API_VERSION})"));
        Self {
            rows: vec![
                (ENDPOINT_VAR, presence(ENDPOINT_VAR)),
                (API_KEY_VAR, presence(API_KEY_VAR)),
                (API_VERSION_VAR, version),
                (DEPLOYMENT_VAR, presence(DEPLOYMENT_VAR)),
            ],
        }
    }
}
