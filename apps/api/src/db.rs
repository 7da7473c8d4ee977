use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a lazily-connecting PostgreSQL pool.
///
/// No connection is opened until the first query, so the API starts and
/// serves fallback content while the database is unreachable.
pub fn create_pool(database_url: &str, acquire_timeout: Duration) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)?;

    info!("PostgreSQL pool configured (lazy connect)");
    Ok(pool)
}
