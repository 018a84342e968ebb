// core/src/memory.rs

//! In-process implementations of [`Catalog`] and [`CartStore`].
//!
//! Used by the test-suites and by the server's `memory` backend.

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::model::{CallerIdentity, Cart, ProductId, ProductSnapshot};
use crate::store::CartStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
  products: Arc<RwLock<HashMap<ProductId, ProductSnapshot>>>,
}

impl InMemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: impl IntoIterator<Item = ProductSnapshot>) -> Self {
    let catalog = Self::new();
    for product in products {
      catalog.upsert(product);
    }
    catalog
  }

  pub fn upsert(&self, product: ProductSnapshot) {
    self.products.write().insert(product.id, product);
  }

  /// Returns `false` if the product is unknown.
  pub fn set_price(&self, id: &ProductId, price: Decimal) -> bool {
    match self.products.write().get_mut(id) {
      Some(product) => {
        product.price = price;
        true
      }
      None => false,
    }
  }

  pub fn remove(&self, id: &ProductId) -> Option<ProductSnapshot> {
    self.products.write().remove(id)
  }

  pub fn len(&self) -> usize {
    self.products.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.read().is_empty()
  }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
  async fn find_product(&self, id: &ProductId) -> anyhow::Result<Option<ProductSnapshot>> {
    Ok(self.products.read().get(id).cloned())
  }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStore {
  carts: Arc<RwLock<HashMap<CallerIdentity, Cart>>>,
}

impl InMemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Direct read for assertions; bypasses the trait.
  pub fn snapshot(&self, owner: &CallerIdentity) -> Option<Cart> {
    self.carts.read().get(owner).cloned()
  }

  pub fn len(&self) -> usize {
    self.carts.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.carts.read().is_empty()
  }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
  async fn find(&self, owner: &CallerIdentity) -> anyhow::Result<Option<Cart>> {
    Ok(self.carts.read().get(owner).cloned())
  }

  async fn insert(&self, cart: &Cart) -> anyhow::Result<()> {
    let mut carts = self.carts.write();
    if carts.contains_key(&cart.owner_id) {
      bail!("cart for owner '{}' already exists", cart.owner_id);
    }
    carts.insert(cart.owner_id.clone(), cart.clone());
    Ok(())
  }

  async fn update_contents(&self, cart: &Cart) -> anyhow::Result<()> {
    let mut carts = self.carts.write();
    let stored = carts
      .get_mut(&cart.owner_id)
      .ok_or_else(|| anyhow!("no cart stored for owner '{}'", cart.owner_id))?;
    stored.items = cart.items.clone();
    stored.total = cart.total;
    stored.updated_at = cart.updated_at;
    Ok(())
  }

  async fn delete(&self, owner: &CallerIdentity) -> anyhow::Result<bool> {
    Ok(self.carts.write().remove(owner).is_some())
  }
}
