//! Connection pool initialization and migration runner.
//!
//! The pool is created once at startup and handed to the entity store
//! explicitly; nothing in this crate reaches for a global database handle.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;

use crate::config::config;

/// Initialize the Postgres connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let db = &config().database;

    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(Duration::from_secs(db.connect_timeout_secs))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
