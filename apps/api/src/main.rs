mod config;
mod db;
mod errors;
mod evaluations;
mod extraction;
mod jobs;
mod models;
mod resumes;
mod routes;
mod scoring;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageConfig};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::scoring::engine::ScoringWeights;
use crate::scoring::{ResumeScorer, ScoringEngine};
use crate::state::AppState;
use crate::storage::{LocalStore, ObjectStore, S3Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize resume file storage
    let storage: Arc<dyn ObjectStore> = match &config.storage {
        StorageConfig::S3(settings) => Arc::new(S3Store::connect(settings).await),
        StorageConfig::Local { upload_dir } => {
            tokio::fs::create_dir_all(upload_dir).await?;
            Arc::new(LocalStore::new(upload_dir))
        }
    };
    info!("Storage backend initialized ({})", storage.backend());

    // Initialize scorer (rule-based engine with default weights)
    let engine = ScoringEngine::new(ScoringWeights::default());
    engine.weights().validate()?;
    info!("Scorer initialized: {} {:?}", engine.backend(), engine.weights());
    let scorer: Arc<dyn ResumeScorer> = Arc::new(engine);

    // Build app state
    let state = AppState {
        db,
        storage,
        config: config.clone(),
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
