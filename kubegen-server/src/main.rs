mod config;
mod router;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub struct AppState {
    pub config: Config,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting kubegen server");

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr;

    tracing::info!(
        "Strict one-of requests: {}, body limit: {} bytes",
        config.strict_one_of,
        config.max_body_bytes
    );

    let app = Arc::new(AppState { config });
    let router = router::build_router(app);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;

    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        return;
    }
    tracing::info!("Received Ctrl-C, shutting down...");
}
