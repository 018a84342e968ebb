// app/src/db/catalog.rs

use anyhow::Context;
use async_trait::async_trait;
use cart_core::{Catalog, ProductId, ProductSnapshot};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  name: String,
  price: Decimal,
}

impl From<ProductRow> for ProductSnapshot {
  fn from(row: ProductRow) -> Self {
    ProductSnapshot::new(ProductId::new(row.id), row.name, row.price)
  }
}

/// Product lookups against the `products` table.
#[derive(Debug, Clone)]
pub struct PgCatalog {
  pool: PgPool,
}

impl PgCatalog {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl Catalog for PgCatalog {
  async fn find_product(&self, id: &ProductId) -> anyhow::Result<Option<ProductSnapshot>> {
    let row: Option<ProductRow> = sqlx::query_as("SELECT id, name, price FROM products WHERE id = $1")
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await
      .with_context(|| format!("fetching product {}", id))?;
    Ok(row.map(ProductSnapshot::from))
  }
}
