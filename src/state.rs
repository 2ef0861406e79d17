use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application state handed to every handler and middleware.
///
/// Constructed once at startup; everything in here is read-only for the
/// lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
        }
    }
}
