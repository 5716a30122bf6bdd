use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{build_router, AppState};
use spots_core::{
    config::data_file_from_env_value, constants::DATA_FILE_ENV, CoreConfig, SpotStore,
};

/// Main entry point for the scenic spots backend
///
/// Serves the JSON API and the admin forms from one axum server, backed by a
/// single JSON document on disk.
///
/// # Environment Variables
/// - `SPOTS_REST_ADDR`: Server address (default: "0.0.0.0:5000")
/// - `SPOTS_DATA_FILE`: Spots JSON document (default: "data/spots.json")
/// - `RUST_LOG`: Tracing filter (default directive: "spots_run=info,api_rest=info,spots_core=info")
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
/// Returns an error if:
/// - the tracing filter cannot be parsed,
/// - the configured data file path is unusable,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spots_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("spots_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SPOTS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());
    let data_file = data_file_from_env_value(std::env::var(DATA_FILE_ENV).ok());

    let cfg = Arc::new(
        CoreConfig::new(data_file)
            .context("invalid spots data file configuration")?,
    );
    tracing::info!("++ Spots data file: {}", cfg.data_file().display());

    let store = Arc::new(SpotStore::new(cfg));
    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!("++ Starting spots REST on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to install Ctrl+C signal handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("-- Shutting down spots REST");
}
