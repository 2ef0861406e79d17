use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

pub mod models;

/// Build the connection pool described by the configuration.
///
/// Connections are established on first use; while the database is
/// unreachable the service stays up and `/health` reports degraded.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_lazy(&config.url)
}

/// Ping the database to make sure the pool is serving connections.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
