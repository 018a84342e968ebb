// core/src/lib.rs

//! cart_core: per-user shopping carts over a pluggable catalog and cart store.
//!
//! The crate owns the rules that keep a cart consistent:
//!  - at most one line item per product,
//!  - price and name snapshotted from the catalog when a product is first added,
//!  - a `total` that is always recomputed from the items, never patched,
//!  - strictly positive quantities,
//!  - one terminal write per operation, serialized per owner.
//!
//! Transports (HTTP, CLI, tests) build a request type from [`command`], validate it
//! with the caller's [`CallerIdentity`], and hand the typed command to [`CartEngine`].

pub mod catalog;
pub mod command;
pub mod engine;
pub mod error;
pub mod locks;
pub mod memory;
pub mod model;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::catalog::Catalog;
pub use crate::command::{
  require_owner, AddItem, AddItemRequest, RemoveItem, RemoveItemRequest, SetQuantity, SetQuantityRequest,
};
pub use crate::engine::{AddItemOutcome, CartEngine};
pub use crate::error::{CartError, CartResult};
pub use crate::locks::{OwnerGuard, OwnerLocks};
pub use crate::memory::{InMemoryCartStore, InMemoryCatalog};
pub use crate::model::{CallerIdentity, Cart, LineItem, ProductId, ProductSnapshot};
pub use crate::store::CartStore;

pub use rust_decimal::Decimal;
