// Library exports for the binary and the integration tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use config::Config;
use middleware::auth::TokenKeys;

/// Application state shared across all handlers. Built once at startup and
/// never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub tokens: TokenKeys,
}

impl AppState {
    /// Fails when the signing secret is empty.
    pub fn new(db: PgPool, config: Config) -> Result<Self, config::ConfigError> {
        let tokens = TokenKeys::new(&config.jwt_secret, config.jwt_expiry_seconds)?;
        Ok(Self {
            db,
            config: Arc::new(config),
            tokens,
        })
    }
}
