// app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use cart_core::CartError;
use serde_json::json;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Authentication Failed: {0}")]
  Unauthorized(String),

  #[error(transparent)]
  Cart(#[from] CartError),

  /// Malformed request body or path, detected before the engine runs.
  #[error("{0}")]
  BadRequest(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),
}

impl AppError {
  /// Text shown to the caller. Internal details never leave the process.
  pub fn public_message(&self) -> String {
    match self {
      AppError::Cart(CartError::Storage { .. }) => INTERNAL_ERROR_MESSAGE.to_string(),
      AppError::Cart(e) => e.to_string(),
      AppError::BadRequest(m) | AppError::Unauthorized(m) => m.clone(),
      AppError::Config(_) | AppError::Sqlx(_) => INTERNAL_ERROR_MESSAGE.to_string(),
    }
  }
}

/// `{"error": .., "message": ..}` with the same text in both fields, so callers reading
/// either key get the message.
pub fn error_body(message: &str) -> serde_json::Value {
  json!({ "error": message, "message": message })
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Cart(CartError::Validation(_)) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      AppError::Cart(e) if e.is_not_found() => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with internal error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }
    HttpResponse::build(status).json(error_body(&self.public_message()))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
