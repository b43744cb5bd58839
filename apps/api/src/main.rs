mod config;
mod errors;
mod llm_client;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::augmenter::{AugmenterProvider, OpenAiAugmenterProvider};
use crate::scoring::engine::FitScoreEngine;
use crate::scoring::tables::ScoringTables;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FitScore API v{}", env!("CARGO_PKG_VERSION"));

    // Load scoring tables (built-in policy unless a file is configured)
    let tables = match &config.scoring_tables_path {
        Some(path) => {
            let tables = ScoringTables::load(path)?;
            info!("Scoring tables loaded from {}", path.display());
            tables
        }
        None => ScoringTables::default(),
    };

    // Initialize augmentation provider (per-request key overrides the configured one)
    let provider: Arc<dyn AugmenterProvider> = Arc::new(OpenAiAugmenterProvider::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.ai_timeout,
    ));
    info!(
        "Augmentation {} (model: {}, timeout: {:?})",
        if config.openai_api_key.is_some() {
            "enabled by default"
        } else {
            "available only with a per-request key"
        },
        llm_client::MODEL,
        config.ai_timeout
    );

    let engine = FitScoreEngine::new(Arc::new(tables), Some(provider), config.ai_timeout);

    // Build app state
    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
