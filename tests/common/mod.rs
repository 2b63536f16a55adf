#![allow(dead_code)]

pub mod provider_stub;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{body::Body, Router};
use cpl_chat::config::{map_env, API_KEY_VAR, DEPLOYMENT_VAR, ENDPOINT_VAR};
use cpl_chat::provider::ProviderFactory;
use cpl_chat::server::build_router_with_state;
use cpl_chat::util::AppState;
use http::{Request, StatusCode};
use tower::ServiceExt;

/// Fully configured provider environment.
pub fn full_env() -> Vec<(&'static str, &'static str)> {
    vec![
        (ENDPOINT_VAR, "https://cpl.openai.azure.com"),
        (API_KEY_VAR, "test-api-key"),
        (DEPLOYMENT_VAR, "gpt-4o-mini"),
    ]
}

pub fn env_without(var: &str) -> Vec<(&'static str, &'static str)> {
    full_env().into_iter().filter(|(k, _)| *k != var).collect()
}

pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Router over an injected environment and provider factory.
pub fn app(vars: Vec<(&'static str, &'static str)>, providers: Arc<dyn ProviderFactory>) -> Router {
    let state = AppState::new(map_env(vars), providers).with_static_dir(static_dir());
    build_router_with_state(state)
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.expect("router is infallible");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, bytes.to_vec())
}

pub async fn get(app: Router, path: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::get(path).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_chat(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::post("/api/chat")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, req).await;
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}
