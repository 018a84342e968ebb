// core/src/model/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a catalog product. Carts only reference it, they never own it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
  pub fn new(id: Uuid) -> Self {
    ProductId(id)
  }

  pub fn new_random() -> Self {
    ProductId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl FromStr for ProductId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(ProductId)
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// What the catalog reports about a product at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
  pub id: ProductId,
  pub name: String,
  pub price: Decimal,
}

impl ProductSnapshot {
  pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
    Self {
      id,
      name: name.into(),
      price,
    }
  }
}
