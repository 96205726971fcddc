mod config;
mod errors;
mod ingest;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary is read once and shared read-only
    let vocabulary = Arc::new(config.load_vocabulary()?);
    match &config.skills_file {
        Some(path) => info!(
            "Loaded {} skills from {}",
            vocabulary.len(),
            path.display()
        ),
        None => info!("Using built-in skill vocabulary ({} skills)", vocabulary.len()),
    }

    let sample_jd = config.load_sample_jd()?.map(Arc::<str>::from);
    if sample_jd.is_some() {
        info!("Sample job description loaded");
    }

    let state = AppState {
        config: config.clone(),
        vocabulary,
        sample_jd,
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
