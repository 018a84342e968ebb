// app/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod state;
mod web;

use crate::config::{AppConfig, CartBackend, LogFormat};
use crate::errors::Result as AppResult;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use cart_core::{CartEngine, InMemoryCartStore, InMemoryCatalog};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default INFO level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

/// Wires the engine to the configured backend, creating schema and demo data as requested.
async fn build_engine(config: &AppConfig) -> AppResult<CartEngine> {
  match config.backend {
    CartBackend::Postgres => {
      let pool = db::connect(config).await?;
      db::ensure_schema(&pool).await?;
      if config.seed_db {
        db::seed::seed_postgres(&pool).await?;
      }
      Ok(CartEngine::new(
        Arc::new(db::PgCatalog::new(pool.clone())),
        Arc::new(db::PgCartStore::new(pool)),
      ))
    }
    CartBackend::Memory => {
      tracing::warn!("Using the in-memory backend; carts are lost on restart.");
      let catalog = InMemoryCatalog::new();
      if config.seed_db {
        db::seed::seed_memory(&catalog);
      }
      Ok(CartEngine::new(Arc::new(catalog), Arc::new(InMemoryCartStore::new())))
    }
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Configuration is loaded before tracing so LOG_FORMAT can pick the formatter.
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("Configuration error: {}", e);
      std::process::exit(1);
    }
  };
  init_tracing(app_config.log_format);

  tracing::info!("Starting cart service...");

  let engine = match build_engine(&app_config).await {
    Ok(engine) => engine,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise the cart backend.");
      std::process::exit(1);
    }
  };

  let server_address = app_config.bind_address();
  let app_state = AppState::new(engine, app_config);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
