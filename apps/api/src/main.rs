mod certification;
mod config;
mod engine;
mod errors;
mod models;
mod routes;
mod state;
mod store;
mod taxonomy;
mod workers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::engine::SkillEngine;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::InMemoryProfileStore;
use crate::taxonomy::catalog::{Taxonomy, TaxonomyDocument};

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

    info!("Starting skillmatch v{}", env!("CARGO_PKG_VERSION"));

    let taxonomy = load_taxonomy(&config)?;
    let stats = taxonomy.stats();
    info!(
        version = stats.version.as_deref().unwrap_or("unversioned"),
        tasks = stats.total_canonical_tasks,
        skills = stats.total_skills,
        aliases = stats.total_aliases,
        certifications = stats.total_certifications,
        "Taxonomy loaded"
    );

    let state = AppState {
        engine: SkillEngine::new(taxonomy),
        store: Arc::new(InMemoryProfileStore::new()),
        config: config.clone(),
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

/// `TAXONOMY_PATH` when set, otherwise the catalog compiled into the binary.
fn load_taxonomy(config: &Config) -> Result<Taxonomy> {
    let document = match &config.taxonomy_path {
        Some(path) => {
            info!("Loading taxonomy from {}", path.display());
            TaxonomyDocument::from_path(path)
        }
        None => TaxonomyDocument::bundled(),
    }
    .context("failed to read taxonomy document")?;

    Taxonomy::new(document).context("taxonomy document failed validation")
}
