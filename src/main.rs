use anyhow::Context;
use tracing_subscriber::EnvFilter;

use baboo_support_api::{api, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up IDENTITY_LEGACY_ADMIN_EMAIL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    tracing::info!("Starting Baboo Support API in {:?} mode", config.environment);
    if config.identity.legacy_admin_email.is_none() {
        tracing::warn!("IDENTITY_LEGACY_ADMIN_EMAIL not set; legacy team messages will show their raw author");
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, api::app(config)).await.context("server error")?;
    Ok(())
}
