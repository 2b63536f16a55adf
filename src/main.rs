use anyhow::Context;
use cpl_chat::server::build_router;
use cpl_chat::util::{env_bind_addr, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    for var in [
        cpl_chat::config::ENDPOINT_VAR,
        cpl_chat::config::API_KEY_VAR,
        cpl_chat::config::DEPLOYMENT_VAR,
    ] {
        if std::env::var(var).map(|v| v.is_empty()).unwrap_or(true) {
            tracing::warn!("{} is not set; /api/chat will fail until it is", var);
        }
    }

    let app = build_router();

    let addr = env_bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("CPL chat listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
