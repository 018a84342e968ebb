// app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Where carts and products are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartBackend {
  Postgres,
  Memory,
}

impl FromStr for CartBackend {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" | "pg" => Ok(CartBackend::Postgres),
      "memory" | "in-memory" => Ok(CartBackend::Memory),
      other => Err(AppError::Config(format!(
        "Invalid CART_BACKEND '{}': expected 'postgres' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" | "text" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!("Invalid LOG_FORMAT '{}'", other))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub backend: CartBackend,
  /// Required only for the Postgres backend.
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  pub seed_db: bool,
  /// When true, a body `ownerId` is used if no authenticated identity is present.
  pub accept_body_owner_id: bool,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 3333,
      backend: CartBackend::Postgres,
      database_url: None,
      database_max_connections: 5,
      seed_db: false,
      accept_body_owner_id: true,
      log_format: LogFormat::Pretty,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from an arbitrary variable source.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();

    let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_or("SERVER_PORT", &lookup, defaults.server_port)?;
    let backend = match lookup("CART_BACKEND") {
      Some(raw) => raw.parse::<CartBackend>()?,
      None => defaults.backend,
    };
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
    if backend == CartBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' (required when CART_BACKEND=postgres)".to_string(),
      ));
    }
    let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", &lookup, defaults.database_max_connections)?;
    let seed_db = parse_or("SEED_DB", &lookup, defaults.seed_db)?;
    let accept_body_owner_id = parse_or("ACCEPT_BODY_OWNER_ID", &lookup, defaults.accept_body_owner_id)?;
    let log_format = match lookup("LOG_FORMAT") {
      Some(raw) => raw.parse::<LogFormat>()?,
      None => defaults.log_format,
    };

    Ok(Self {
      server_host,
      server_port,
      backend,
      database_url,
      database_max_connections,
      seed_db,
      accept_body_owner_id,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_or<T>(name: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match lookup(name) {
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e))),
    None => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn postgres_backend_requires_database_url() {
    let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
  }

  #[test]
  fn memory_backend_uses_defaults() {
    let cfg = AppConfig::from_lookup(lookup_from(&[("CART_BACKEND", "memory")])).unwrap();
    assert_eq!(cfg.backend, CartBackend::Memory);
    assert_eq!(cfg.bind_address(), "127.0.0.1:3333");
    assert!(cfg.accept_body_owner_id);
    assert!(!cfg.seed_db);
    assert_eq!(cfg.log_format, LogFormat::Pretty);
  }

  #[test]
  fn explicit_values_are_parsed() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
      ("DATABASE_URL", "postgres://localhost/carts"),
      ("SERVER_PORT", "8080"),
      ("SEED_DB", "true"),
      ("ACCEPT_BODY_OWNER_ID", "false"),
      ("LOG_FORMAT", "json"),
      ("DATABASE_MAX_CONNECTIONS", "12"),
    ]))
    .unwrap();
    assert_eq!(cfg.backend, CartBackend::Postgres);
    assert_eq!(cfg.server_port, 8080);
    assert_eq!(cfg.database_max_connections, 12);
    assert!(cfg.seed_db);
    assert!(!cfg.accept_body_owner_id);
    assert_eq!(cfg.log_format, LogFormat::Json);
  }

  #[test]
  fn invalid_port_is_config_error() {
    let err = AppConfig::from_lookup(lookup_from(&[("CART_BACKEND", "memory"), ("SERVER_PORT", "http")])).unwrap_err();
    assert!(matches!(err, AppError::Config(m) if m.contains("SERVER_PORT")));
  }
}
