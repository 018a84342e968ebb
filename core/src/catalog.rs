// core/src/catalog.rs

//! Read-only view of the product catalog.

use async_trait::async_trait;

use crate::model::{ProductId, ProductSnapshot};

/// Resolves a product id to its current name and price.
///
/// `Ok(None)` means the product does not exist; `Err` is reserved for failures of the
/// catalog itself.
#[async_trait]
pub trait Catalog: Send + Sync {
  async fn find_product(&self, id: &ProductId) -> anyhow::Result<Option<ProductSnapshot>>;
}
