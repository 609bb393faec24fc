//! SkySweep Server - flight history and sweep dispatch backend

use anyhow::{Context, Result};
use skysweep_dispatch::DispatchClient;
use skysweep_server::config::{Config, LogFormat};
use skysweep_server::state::AppState;
use skysweep_server::{api, persistence};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("skysweep_server=debug".parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_format)?;

    tracing::info!("Starting SkySweep Server...");

    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_path))?;
    let dispatcher = DispatchClient::new(&config.dispatch_url, config.dispatch_timeout)
        .context("Failed to create dispatch client")?;
    tracing::info!("Dispatching sweeps to {}", dispatcher.base_url());

    let state = Arc::new(AppState::new(db, dispatcher, config));

    if state.config().seed_sample {
        state
            .seed_sample_if_empty()
            .await
            .context("Failed to seed sample flight log")?;
    }

    let app = api::routes().with_state(state.clone()).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config().server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
