// core/src/locks.rs

//! Per-owner serialization of cart mutations.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slots = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Hands out one async mutex per owner id.
///
/// Holding an [`OwnerGuard`] across awaits is fine: the guard wraps a tokio mutex.
/// The `parking_lot` table lock is only taken for the map lookup and never across an
/// await.
#[derive(Debug, Clone, Default)]
pub struct OwnerLocks {
  slots: Slots,
}

impl OwnerLocks {
  pub fn new() -> Self {
    Self::default()
  }

  /// Waits until no other guard for `owner` is alive.
  pub async fn acquire(&self, owner: &str) -> OwnerGuard {
    let slot = {
      let mut slots = self.slots.lock();
      Arc::clone(slots.entry(owner.to_string()).or_default())
    };
    let guard = slot.lock_owned().await;
    OwnerGuard {
      owner: owner.to_string(),
      slots: Arc::clone(&self.slots),
      guard: Some(guard),
    }
  }

  /// Number of owners with a live or awaited guard.
  pub fn active_owners(&self) -> usize {
    self.slots.lock().len()
  }
}

#[derive(Debug)]
pub struct OwnerGuard {
  owner: String,
  slots: Slots,
  guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OwnerGuard {
  fn drop(&mut self) {
    let Some(guard) = self.guard.take() else {
      return;
    };
    let mut slots = self.slots.lock();
    let slot = Arc::clone(OwnedMutexGuard::mutex(&guard));
    drop(guard);
    // Table entry plus `slot`: nobody else holds or waits on this owner.
    if Arc::strong_count(&slot) == 2 {
      slots.remove(&self.owner);
    }
  }
}
