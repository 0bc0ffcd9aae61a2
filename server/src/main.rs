//! News API server: loads settings from the environment, connects to
//! PostgreSQL and serves the API.
//!
//! Run from repo root: `cargo run -p news-server`

use news_api::{app, AppState, PgStore, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("news_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = PgStore::connect(&settings.database_url, settings.max_connections).await?;
    tracing::info!(max_connections = settings.max_connections, "connected to database");

    let state = AppState::new(Arc::new(store), settings.vote_policy);
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(vote_policy = ?settings.vote_policy, "listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
