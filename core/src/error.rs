// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
  /// Missing or malformed input. The message is safe to show to the caller.
  #[error("{0}")]
  Validation(String),

  #[error("Cart not found")]
  CartNotFound,

  #[error("Item not found in cart")]
  ItemNotFound,

  #[error("Product not found")]
  ProductNotFound,

  /// Failure inside the catalog or cart store. Never retried.
  #[error("Storage failure: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },
}

impl CartError {
  pub fn validation(message: impl Into<String>) -> Self {
    CartError::Validation(message.into())
  }

  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      CartError::CartNotFound | CartError::ItemNotFound | CartError::ProductNotFound
    )
  }
}

impl From<AnyhowError> for CartError {
  fn from(err: AnyhowError) -> Self {
    CartError::Storage { source: err }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
