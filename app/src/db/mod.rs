// app/src/db/mod.rs

//! Postgres-backed implementations of the cart engine's collaborators.

pub mod cart_store;
pub mod catalog;
pub mod seed;

pub use cart_store::PgCartStore;
pub use catalog::PgCatalog;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{error, info};

const SCHEMA_SQL: &str = include_str!("../../migrations/schema.sql");

pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let database_url = config
    .database_url
    .as_deref()
    .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;

  let pool = PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .connect(database_url)
    .await
    .map_err(|e| {
      error!(error = %e, "Failed to connect to the database.");
      AppError::Sqlx(e)
    })?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

/// Creates the `products` and `carts` tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
  sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
  info!("Database schema is in place.");
  Ok(())
}
