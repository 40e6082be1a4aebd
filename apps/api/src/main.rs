mod analytics;
mod certificates;
mod config;
mod db;
mod errors;
mod interns;
mod matching;
mod mentors;
mod models;
mod projects;
mod resume;
mod routes;
mod state;
mod validation;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::SkillVocabulary;
use crate::resume::DocumentTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting InternDesk API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary: without it nothing can be matched, so a bad file stops startup
    let vocabulary = SkillVocabulary::load(&config.skill_vocabulary_path).with_context(|| {
        format!(
            "cannot load skill vocabulary from '{}'",
            config.skill_vocabulary_path
        )
    })?;
    info!(
        "Skill vocabulary loaded: {} terms from {}",
        vocabulary.len(),
        config.skill_vocabulary_path
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    let state = AppState {
        db,
        config: config.clone(),
        vocabulary: Arc::new(vocabulary),
        resume_extractor: Arc::new(DocumentTextExtractor),
    };
    info!(
        "Zero-score policy: {}",
        if config.drop_zero_scores { "drop" } else { "keep" }
    );

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
