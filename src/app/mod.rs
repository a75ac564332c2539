use axum::Router;
use sqlx::SqlitePool;

/// Human-readable application name.
pub const APP_NAME: &str = "MoodTrace";

/// Shared state available to all handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: config::Config,
    pub gate: gate::SpaceGate,
}

impl AppState {
    /// State with a database-backed gate built from `config`.
    pub fn new(db: SqlitePool, config: config::Config) -> Self {
        let gate = gate::SpaceGate::sqlite(config.gate(), db.clone());
        Self { db, config, gate }
    }
}

/// App routes (spaces, admin, logout). Merged with site routes in lib.rs.
pub fn routes(config: &config::Config) -> Router<AppState> {
    Router::new()
        .merge(features::auth::routes())
        .merge(features::spaces::routes(config))
        .merge(features::admin::routes(config))
}

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod gate;
pub mod session;
pub mod tenant;
