mod batch;
mod config;
mod errors;
mod models;
mod nlp;
mod parsing;
mod routes;
mod state;
mod summary;
mod upload;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::nlp::build_pipeline;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Resume API v{} (nlp backend: {})",
        env!("CARGO_PKG_VERSION"),
        config.nlp_backend.as_str()
    );

    // Language pipeline must be ready before any upload is accepted.
    let pipeline = build_pipeline(&config)?;
    if let Err(e) = pipeline.ready().await {
        error!(backend = pipeline.name(), "Language model is not available: {e}");
        return Err(e).context("language pipeline is not ready; start the model server first");
    }
    info!("Language pipeline ready (backend: {})", pipeline.name());

    let state = AppState {
        config: config.clone(),
        pipeline,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
