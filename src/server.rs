use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::chat::chat_handler;
use crate::config::EnvStatus;
use crate::pages;
use crate::util::{cors_layer_from_env, AppState};

/// Build the router with state read from the process environment.
pub fn build_router() -> Router {
    build_router_with_state(AppState::default())
}

/// Build the router for a given state (tests inject their own env lookup and provider factory).
pub fn build_router_with_state(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    let state = Arc::new(state);

    Router::new()
        .route("/", get(home))
        .route("/chat", get(chat_page))
        .route("/admin", get(admin))
        .route("/health", get(health))
        .route("/versions", get(versions))
        // No body size limit on chat turns.
        .route(
            "/api/chat",
            post(chat_handler).layer(DefaultBodyLimit::disable()),
        )
        .nest_service("/static", static_files)
        .with_state(state)
        .layer(cors_layer_from_env())
        .layer(TraceLayer::new_for_http())
}

async fn home() -> Html<&'static str> {
    pages::home()
}

async fn chat_page() -> Html<&'static str> {
    pages::chat()
}

/// Diagnostics page: presence of each provider variable, re-read per request.
async fn admin(State(state): State<Arc<AppState>>) -> Html<String> {
    pages::admin(&EnvStatus::collect(&state.env))
}

/// Liveness probe; independent of provider configuration.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub rustc_version: &'static str,
    pub reqwest_version: &'static str,
    pub axum_version: &'static str,
    pub tokio_version: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            rustc_version: env!("CPL_CHAT_RUSTC_VERSION"),
            reqwest_version: env!("CPL_CHAT_REQWEST_VERSION"),
            axum_version: env!("CPL_CHAT_AXUM_VERSION"),
            tokio_version: env!("CPL_CHAT_TOKIO_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

/// Build/runtime identification for troubleshooting deployments.
///
/// Versions are captured by the build script from `rustc --version` and Cargo.lock.
async fn versions() -> Json<VersionInfo> {
    Json(VersionInfo::current())
}
