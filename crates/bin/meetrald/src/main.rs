//! # meetrald — meetral daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use meetral_adapter_http_axum::state::AppState;
use meetral_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteEventRepository, SqliteFavoritesRepository,
};
use meetral_app::cache::MemoryStore;
use meetral_app::ports::SystemClock;
use meetral_app::services::event_service::EventService;
use meetral_app::services::feed_service::FeedService;
use meetral_domain::ranking::RankingWeights;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories — each service gets its own instance over the shared pool.
    let clock = SystemClock;
    let store = MemoryStore::new();
    let weights = RankingWeights {
        include_likes: config.ranking.include_likes,
        ..RankingWeights::default()
    };

    // Services — the shared cache store lets event writes invalidate
    // cached feed pages.
    let feed_service = FeedService::with_weights(
        SqliteEventRepository::new(pool.clone()),
        SqliteFavoritesRepository::new(pool.clone()),
        store.clone(),
        clock,
        weights,
    );
    let event_service = EventService::new(
        SqliteEventRepository::new(pool.clone()),
        SqliteFavoritesRepository::new(pool),
        store,
        clock,
    );

    // HTTP
    let state = AppState::new(feed_service, event_service);
    let app = meetral_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "meetrald listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
