//! Database access layer: models and repositories over PostgreSQL.
//!
//! Repositories are zero-sized structs with async methods taking `&PgPool`
//! (reads, standalone writes) or `&mut PgConnection` (writes that must share
//! a caller-owned transaction). No business rules live here; validation and
//! policy belong to `encuesta-core` and the engine crate.

pub mod models;
pub mod repositories;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Shared connection pool handle.
pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// ```no_run
/// # async fn run() -> Result<(), sqlx::Error> {
/// let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
/// let pool = encuesta_db::create_pool(&url).await?;
/// encuesta_db::health_check(&pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

/// Lightweight connectivity probe.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
