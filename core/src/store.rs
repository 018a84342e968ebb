// core/src/store.rs

//! Persistence contract for carts, keyed by owner identity.

use async_trait::async_trait;

use crate::model::{CallerIdentity, Cart};

/// A collection holding at most one cart per owner.
///
/// Implementations do not need to be atomic across calls; `CartEngine` serializes
/// mutations of one owner itself.
#[async_trait]
pub trait CartStore: Send + Sync {
  async fn find(&self, owner: &CallerIdentity) -> anyhow::Result<Option<Cart>>;

  /// Persists a brand new cart. Fails if the owner already has one.
  async fn insert(&self, cart: &Cart) -> anyhow::Result<()>;

  /// Writes `items`, `total` and `updated_at` onto the owner's existing record.
  /// Any other fields the backend keeps on the record are left alone.
  async fn update_contents(&self, cart: &Cart) -> anyhow::Result<()>;

  /// Returns `false` when there was nothing to delete.
  async fn delete(&self, owner: &CallerIdentity) -> anyhow::Result<bool>;
}
