// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use cart_core::{
  AddItem, AddItemRequest, CallerIdentity, Cart, CartEngine, CartStore, Catalog, InMemoryCartStore, InMemoryCatalog,
  ProductId, ProductSnapshot, RemoveItem, RemoveItemRequest, SetQuantity, SetQuantityRequest,
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Catalog fixtures ---

pub fn mousepad() -> ProductSnapshot {
  ProductSnapshot::new(
    ProductId::new_random(),
    "Mousepad Ergonomico com Apoio de Pulso",
    Decimal::new(4990, 2),
  )
}

pub fn monitor_stand() -> ProductSnapshot {
  ProductSnapshot::new(
    ProductId::new_random(),
    "Suporte Ajustavel para Monitor",
    Decimal::new(12990, 2),
  )
}

pub fn owner(raw: &str) -> CallerIdentity {
  CallerIdentity::new(raw).unwrap()
}

pub struct Harness {
  pub engine: CartEngine,
  pub catalog: InMemoryCatalog,
  pub store: InMemoryCartStore,
}

pub fn harness(products: impl IntoIterator<Item = ProductSnapshot>) -> Harness {
  setup_tracing();
  let catalog = InMemoryCatalog::with_products(products);
  let store = InMemoryCartStore::new();
  let engine = CartEngine::new(Arc::new(catalog.clone()), Arc::new(store.clone()));
  Harness { engine, catalog, store }
}

// --- Command builders (go through validation like a transport would) ---

pub fn add(owner_id: &str, product: &ProductId, quantity: i64) -> AddItem {
  AddItemRequest {
    product_id: Some(product.to_string()),
    quantity: Some(quantity),
  }
  .validate(CallerIdentity::new(owner_id))
  .unwrap()
}

pub fn remove(owner_id: &str, product: &ProductId) -> RemoveItem {
  RemoveItemRequest {
    product_id: Some(product.to_string()),
  }
  .validate(CallerIdentity::new(owner_id))
  .unwrap()
}

pub fn set(owner_id: &str, product: &ProductId, quantity: i64) -> SetQuantity {
  SetQuantityRequest {
    product_id: Some(product.to_string()),
    quantity: Some(quantity),
  }
  .validate(CallerIdentity::new(owner_id))
  .unwrap()
}

pub fn assert_total_consistent(cart: &Cart) {
  let expected: Decimal = cart
    .items
    .iter()
    .map(|item| item.unit_price * Decimal::from(item.quantity))
    .sum();
  assert_eq!(cart.total, expected, "total drifted from items: {:?}", cart);
}

// --- Store wrappers for failure and interleaving scenarios ---

/// Yields to the scheduler between every call so that unsynchronized
/// read-modify-write sequences would interleave.
pub struct SlowStore {
  pub inner: InMemoryCartStore,
  pub delay: Duration,
}

#[async_trait]
impl CartStore for SlowStore {
  async fn find(&self, owner: &CallerIdentity) -> anyhow::Result<Option<Cart>> {
    let found = self.inner.find(owner).await;
    tokio::time::sleep(self.delay).await;
    found
  }

  async fn insert(&self, cart: &Cart) -> anyhow::Result<()> {
    tokio::time::sleep(self.delay).await;
    self.inner.insert(cart).await
  }

  async fn update_contents(&self, cart: &Cart) -> anyhow::Result<()> {
    tokio::time::sleep(self.delay).await;
    self.inner.update_contents(cart).await
  }

  async fn delete(&self, owner: &CallerIdentity) -> anyhow::Result<bool> {
    self.inner.delete(owner).await
  }
}

/// Fails writes while `fail_writes` is set; counts every write attempt.
#[derive(Clone, Default)]
pub struct FlakyStore {
  pub inner: InMemoryCartStore,
  pub fail_writes: Arc<AtomicBool>,
  pub write_attempts: Arc<AtomicUsize>,
}

impl FlakyStore {
  fn check(&self) -> anyhow::Result<()> {
    self.write_attempts.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes.load(Ordering::SeqCst) {
      anyhow::bail!("simulated write failure");
    }
    Ok(())
  }
}

#[async_trait]
impl CartStore for FlakyStore {
  async fn find(&self, owner: &CallerIdentity) -> anyhow::Result<Option<Cart>> {
    self.inner.find(owner).await
  }

  async fn insert(&self, cart: &Cart) -> anyhow::Result<()> {
    self.check()?;
    self.inner.insert(cart).await
  }

  async fn update_contents(&self, cart: &Cart) -> anyhow::Result<()> {
    self.check()?;
    self.inner.update_contents(cart).await
  }

  async fn delete(&self, owner: &CallerIdentity) -> anyhow::Result<bool> {
    self.check()?;
    self.inner.delete(owner).await
  }
}

pub struct BrokenCatalog;

#[async_trait]
impl Catalog for BrokenCatalog {
  async fn find_product(&self, _id: &ProductId) -> anyhow::Result<Option<ProductSnapshot>> {
    anyhow::bail!("catalog unavailable")
  }
}
