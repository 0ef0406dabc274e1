//! FilmConsensus Rating Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use film_consensus::api::{self, AppState};
use film_consensus::config::Settings;
use film_consensus::history::History;
use film_consensus::metrics::Metrics;
use film_consensus::providers::omdb::OmdbProvider;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("film_consensus=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env();
    let metrics = Metrics::init();

    let omdb = settings
        .omdb_api_key
        .clone()
        .map(|key| Arc::new(OmdbProvider::from_api_key(key, settings.omdb_timeout)));
    if omdb.is_none() {
        tracing::info!("OMDB_API_KEY not set; /ratings endpoint disabled");
    }

    let state = AppState::new(History::with_capacity(settings.history_capacity), omdb);
    let router = api::create_router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}
