use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{process_env, EnvLookup};
use crate::provider::{AzureProviderFactory, ProviderFactory};

/// Initialize dotenv and structured tracing based on RUST_LOG.
///
/// - Explicit env file paths via ENV_FILE or DOTENV_PATH
/// - Falls back to the default `.env` discovery
/// - Variables already present in the process environment are never overwritten
pub fn init_tracing() {
    let mut env_source: String = "none".into();
    for key in ["ENV_FILE", "DOTENV_PATH"] {
        if let Ok(p) = std::env::var(key) {
            let p = p.trim();
            if !p.is_empty()
                && std::path::Path::new(p).is_file()
                && dotenvy::from_filename(p).is_ok()
            {
                env_source = format!("{p} ({key})");
                break;
            }
        }
    }
    if env_source == "none" {
        if let Ok(path) = dotenvy::dotenv() {
            env_source = path.display().to_string();
        }
    }

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".into());
    let subscriber = fmt().with_env_filter(EnvFilter::new(filter)).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Environment loaded from: {}", env_source);
}

/// Get the bind address for the HTTP server from env or default to 0.0.0.0:8000.
pub fn env_bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into())
}

/// Directory served under `/static`, from STATIC_DIR or `static`.
pub fn env_static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("static"))
}

fn truthy(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Build the outbound HTTP client honoring proxy and timeout environment variables.
///
/// Environment:
/// - CHAT_PROXY_NO_PROXY = 1|true|yes|on   -> disable all proxies (including HTTP(S)_PROXY)
/// - CHAT_PROXY_HTTP_TIMEOUT_SECONDS       -> overall request timeout (u64); unset means none
///
/// Without CHAT_PROXY_NO_PROXY, reqwest picks up HTTP_PROXY / HTTPS_PROXY on its own.
pub fn build_http_client_from_env() -> reqwest::Client {
    let mut builder = reqwest::Client::builder();

    if let Ok(secs) = std::env::var("CHAT_PROXY_HTTP_TIMEOUT_SECONDS") {
        match secs.trim().parse::<u64>() {
            Ok(n) => builder = builder.timeout(Duration::from_secs(n)),
            Err(_) => tracing::warn!(value = %secs, "ignoring invalid CHAT_PROXY_HTTP_TIMEOUT_SECONDS"),
        }
    }

    if truthy("CHAT_PROXY_NO_PROXY") {
        builder = builder.no_proxy();
    }

    builder = builder.user_agent(format!("cpl-chat/{}", env!("CARGO_PKG_VERSION")));

    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default HTTP client");
        reqwest::Client::new()
    })
}

/// Shared application state used by the HTTP server and handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where provider configuration is read from on every request.
    pub env: EnvLookup,
    pub providers: Arc<dyn ProviderFactory>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(env: EnvLookup, providers: Arc<dyn ProviderFactory>) -> Self {
        Self {
            env,
            providers,
            static_dir: env_static_dir(),
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            process_env(),
            Arc::new(AzureProviderFactory::new(build_http_client_from_env())),
        )
    }
}

/// Split a comma-separated env value; `None` when unset, empty, or "*".
fn env_list(key: &str) -> Option<Vec<String>> {
    let raw = std::env::var(key).ok()?;
    let s = raw.trim();
    if s.is_empty() || s == "*" {
        return None;
    }
    let parts: Vec<String> = s
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    (!parts.is_empty()).then_some(parts)
}

/// Build a CORS layer from environment variables.
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: "*" or comma-separated origins
/// - CORS_ALLOWED_METHODS: "*" or comma-separated methods
/// - CORS_ALLOWED_HEADERS: "*" or comma-separated request header names
/// - CORS_ALLOW_CREDENTIALS: enable with 1,true,yes,on
/// - CORS_MAX_AGE: max age in seconds (u64)
///
/// Anything unset (or unparseable) is permissive.
pub fn cors_layer_from_env() -> tower_http::cors::CorsLayer {
    use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

    let mut layer = CorsLayer::new();
    let mut wildcard = false;

    let origins: Vec<http::HeaderValue> = env_list("CORS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .iter()
        .filter_map(|o| http::HeaderValue::from_str(o).ok())
        .collect();
    wildcard |= origins.is_empty();
    layer = if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    };

    let methods: Vec<http::Method> = env_list("CORS_ALLOWED_METHODS")
        .unwrap_or_default()
        .iter()
        .filter_map(|m| http::Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok())
        .collect();
    wildcard |= methods.is_empty();
    layer = if methods.is_empty() {
        layer.allow_methods(Any)
    } else {
        layer.allow_methods(AllowMethods::list(methods))
    };

    let headers: Vec<http::HeaderName> = env_list("CORS_ALLOWED_HEADERS")
        .unwrap_or_default()
        .iter()
        .filter_map(|h| http::HeaderName::try_from(h.as_str()).ok())
        .collect();
    wildcard |= headers.is_empty();
    layer = if headers.is_empty() {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(AllowHeaders::list(headers))
    };

    // tower-http panics on credentials combined with any wildcard.
    if truthy("CORS_ALLOW_CREDENTIALS") {
        if wildcard {
            tracing::warn!("CORS_ALLOW_CREDENTIALS ignored: origins, methods and headers must all be explicit");
        } else {
            layer = layer.allow_credentials(true);
        }
    }

    if let Ok(secs) = std::env::var("CORS_MAX_AGE") {
        if let Ok(n) = secs.trim().parse::<u64>() {
            layer = layer.max_age(Duration::from_secs(n));
        }
    }

    layer
}
