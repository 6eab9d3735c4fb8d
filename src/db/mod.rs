//! Database pool setup.
//!
//! # Responsibilities
//! - Build the Postgres connection pool from configuration
//! - Apply the idempotent bootstrap schema for the default route groups
//! - Fail fast: any error here must keep the process from listening

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Error type for database initialization.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply bootstrap schema: {0}")]
    Schema(#[source] sqlx::Error),
}

/// Connect the pool and bring the schema up to date.
///
/// Called once at startup, before the listener binds.
pub async fn init(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(DbError::Connect)?;

    migrate(&pool).await?;

    tracing::info!(max_connections = config.max_connections, "Database initialized");
    Ok(pool)
}

async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await
    .map_err(DbError::Schema)?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS workouts (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            load INTEGER NOT NULL,
            reps INTEGER NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await
    .map_err(DbError::Schema)?;

    Ok(())
}
