// core/src/engine.rs

//! `CartEngine`: the read-modify-write rules for carts.
//!
//! Every mutation follows the same shape:
//!  1. resolve anything needed from the catalog (add only),
//!  2. take the owner's guard from [`OwnerLocks`],
//!  3. load the cart, apply the change in memory, recompute derived fields,
//!  4. issue exactly one write to the store.
//!
//! An error at any point before step 4 leaves the store untouched.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::catalog::Catalog;
use crate::command::{AddItem, RemoveItem, SetQuantity};
use crate::error::{CartError, CartResult};
use crate::locks::OwnerLocks;
use crate::model::{CallerIdentity, Cart, ProductId, ProductSnapshot};
use crate::store::CartStore;

/// Result of a successful add: whether the cart record was created by this call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddItemOutcome {
  Created(Cart),
  Updated(Cart),
}

impl AddItemOutcome {
  pub fn cart(&self) -> &Cart {
    match self {
      AddItemOutcome::Created(cart) | AddItemOutcome::Updated(cart) => cart,
    }
  }

  pub fn into_cart(self) -> Cart {
    match self {
      AddItemOutcome::Created(cart) | AddItemOutcome::Updated(cart) => cart,
    }
  }

  pub fn is_created(&self) -> bool {
    matches!(self, AddItemOutcome::Created(_))
  }
}

#[derive(Clone)]
pub struct CartEngine {
  catalog: Arc<dyn Catalog>,
  store: Arc<dyn CartStore>,
  locks: OwnerLocks,
}

impl std::fmt::Debug for CartEngine {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartEngine")
      .field("active_owners", &self.locks.active_owners())
      .finish_non_exhaustive()
  }
}

impl CartEngine {
  pub fn new(catalog: Arc<dyn Catalog>, store: Arc<dyn CartStore>) -> Self {
    Self {
      catalog,
      store,
      locks: OwnerLocks::new(),
    }
  }

  #[instrument(
    name = "cart::add_item",
    skip(self, cmd),
    fields(owner = %cmd.owner, product_id = %cmd.product_id, quantity = cmd.quantity.get())
  )]
  pub async fn add_item(&self, cmd: AddItem) -> CartResult<AddItemOutcome> {
    let product = self.lookup_product(&cmd.product_id).await?;

    let _guard = self.locks.acquire(cmd.owner.as_str()).await;
    let now = Utc::now();

    match self.load(&cmd.owner).await? {
      None => {
        let cart = Cart::create(cmd.owner, &product, cmd.quantity, now)?;
        self
          .store
          .insert(&cart)
          .await
          .map_err(|e| storage_failure("insert cart", &cart.owner_id, e))?;
        info!(total = %cart.total, "Created cart with first item.");
        Ok(AddItemOutcome::Created(cart))
      }
      Some(mut cart) => {
        cart.add(&product, cmd.quantity, now)?;
        self.persist(&cart).await?;
        info!(items = cart.items.len(), total = %cart.total, "Merged item into existing cart.");
        Ok(AddItemOutcome::Updated(cart))
      }
    }
  }

  #[instrument(name = "cart::remove_item", skip(self, cmd), fields(owner = %cmd.owner, product_id = %cmd.product_id))]
  pub async fn remove_item(&self, cmd: RemoveItem) -> CartResult<Cart> {
    let _guard = self.locks.acquire(cmd.owner.as_str()).await;

    let mut cart = self.load_existing(&cmd.owner).await?;
    if let Err(e) = cart.remove(&cmd.product_id, Utc::now()) {
      if matches!(e, CartError::ItemNotFound) {
        warn!("Item not present in cart.");
      }
      return Err(e);
    }
    self.persist(&cart).await?;
    info!(items = cart.items.len(), total = %cart.total, "Removed item from cart.");
    Ok(cart)
  }

  #[instrument(
    name = "cart::set_quantity",
    skip(self, cmd),
    fields(owner = %cmd.owner, product_id = %cmd.product_id, quantity = cmd.quantity.get())
  )]
  pub async fn set_quantity(&self, cmd: SetQuantity) -> CartResult<Cart> {
    let _guard = self.locks.acquire(cmd.owner.as_str()).await;

    let mut cart = self.load_existing(&cmd.owner).await?;
    if let Err(e) = cart.set_quantity(&cmd.product_id, cmd.quantity, Utc::now()) {
      if matches!(e, CartError::ItemNotFound) {
        warn!("Item not present in cart.");
      }
      return Err(e);
    }
    self.persist(&cart).await?;
    info!(total = %cart.total, "Updated item quantity.");
    Ok(cart)
  }

  #[instrument(name = "cart::get", skip_all, fields(owner = %owner))]
  pub async fn get_cart(&self, owner: &CallerIdentity) -> CartResult<Cart> {
    self.load_existing(owner).await
  }

  #[instrument(name = "cart::delete", skip_all, fields(owner = %owner))]
  pub async fn delete_cart(&self, owner: &CallerIdentity) -> CartResult<()> {
    let _guard = self.locks.acquire(owner.as_str()).await;

    let deleted = self
      .store
      .delete(owner)
      .await
      .map_err(|e| storage_failure("delete cart", owner, e))?;
    if !deleted {
      warn!("No cart to delete.");
      return Err(CartError::CartNotFound);
    }
    info!("Cart deleted.");
    Ok(())
  }

  async fn lookup_product(&self, product_id: &ProductId) -> CartResult<ProductSnapshot> {
    match self.catalog.find_product(product_id).await {
      Ok(Some(product)) => Ok(product),
      Ok(None) => {
        warn!("Product not found in catalog.");
        Err(CartError::ProductNotFound)
      }
      Err(e) => {
        error!(error = %e, "Catalog lookup failed.");
        Err(CartError::Storage { source: e })
      }
    }
  }

  async fn load(&self, owner: &CallerIdentity) -> CartResult<Option<Cart>> {
    self
      .store
      .find(owner)
      .await
      .map_err(|e| storage_failure("load cart", owner, e))
  }

  async fn load_existing(&self, owner: &CallerIdentity) -> CartResult<Cart> {
    self.load(owner).await?.ok_or_else(|| {
      warn!("Cart not found.");
      CartError::CartNotFound
    })
  }

  async fn persist(&self, cart: &Cart) -> CartResult<()> {
    self
      .store
      .update_contents(cart)
      .await
      .map_err(|e| storage_failure("update cart", &cart.owner_id, e))
  }
}

fn storage_failure(action: &str, owner: &CallerIdentity, source: anyhow::Error) -> CartError {
  error!(%owner, error = %source, "Failed to {}.", action);
  CartError::Storage { source }
}
