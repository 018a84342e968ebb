// core/src/model/cart.rs

//! The cart record and its line items.
//!
//! Every mutating method on [`Cart`] recomputes `total` from scratch and stamps
//! `updated_at`, so a cart handed to the store always satisfies:
//!  - `total` equals the sum of `unit_price * quantity` over `items`,
//!  - no two items share a `product_id`,
//!  - every `quantity` is at least one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use super::identity::CallerIdentity;
use super::product::{ProductId, ProductSnapshot};
use crate::error::{CartError, CartResult};

/// One product's presence in a cart.
///
/// `unit_price` and `display_name` are copied from the catalog when the product is
/// first added and are never refreshed afterwards, not even on quantity changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  pub product_id: ProductId,
  pub quantity: u32,
  pub unit_price: Decimal,
  pub display_name: String,
}

impl LineItem {
  pub fn from_snapshot(product: &ProductSnapshot, quantity: NonZeroU32) -> Self {
    Self {
      product_id: product.id,
      quantity: quantity.get(),
      unit_price: product.price,
      display_name: product.name.clone(),
    }
  }

  /// `None` if the product overflows the decimal range.
  pub fn line_total(&self) -> Option<Decimal> {
    self.unit_price.checked_mul(Decimal::from(self.quantity))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  pub owner_id: CallerIdentity,
  pub items: Vec<LineItem>,
  pub total: Decimal,
  pub updated_at: DateTime<Utc>,
}

impl Cart {
  /// A fresh cart holding a single line built from `product`.
  pub fn create(
    owner_id: CallerIdentity,
    product: &ProductSnapshot,
    quantity: NonZeroU32,
    now: DateTime<Utc>,
  ) -> CartResult<Self> {
    let mut cart = Self {
      owner_id,
      items: vec![LineItem::from_snapshot(product, quantity)],
      total: Decimal::ZERO,
      updated_at: now,
    };
    cart.refresh(now)?;
    Ok(cart)
  }

  pub fn find_item(&self, product_id: &ProductId) -> Option<&LineItem> {
    self.items.iter().find(|item| item.product_id == *product_id)
  }

  /// Merges `quantity` units of `product` into the cart.
  ///
  /// An existing line keeps its original price and name and only has its quantity
  /// increased. Otherwise a new line is appended from the snapshot.
  pub fn add(&mut self, product: &ProductSnapshot, quantity: NonZeroU32, now: DateTime<Utc>) -> CartResult<()> {
    match self.items.iter_mut().find(|item| item.product_id == product.id) {
      Some(existing) => {
        existing.quantity = existing
          .quantity
          .checked_add(quantity.get())
          .ok_or_else(|| CartError::validation("quantity is too large"))?;
      }
      None => self.items.push(LineItem::from_snapshot(product, quantity)),
    }
    self.refresh(now)
  }

  /// Drops the line for `product_id`. Removing the last line leaves an empty cart.
  pub fn remove(&mut self, product_id: &ProductId, now: DateTime<Utc>) -> CartResult<LineItem> {
    let index = self
      .items
      .iter()
      .position(|item| item.product_id == *product_id)
      .ok_or(CartError::ItemNotFound)?;
    let removed = self.items.remove(index);
    self.refresh(now)?;
    Ok(removed)
  }

  /// Replaces the quantity of an existing line. Never creates a line.
  pub fn set_quantity(&mut self, product_id: &ProductId, quantity: NonZeroU32, now: DateTime<Utc>) -> CartResult<()> {
    let item = self
      .items
      .iter_mut()
      .find(|item| item.product_id == *product_id)
      .ok_or(CartError::ItemNotFound)?;
    item.quantity = quantity.get();
    self.refresh(now)
  }

  /// Sum of `unit_price * quantity` over all lines.
  pub fn computed_total(&self) -> CartResult<Decimal> {
    self.items.iter().try_fold(Decimal::ZERO, |acc, item| {
      item
        .line_total()
        .and_then(|line| acc.checked_add(line))
        .ok_or_else(|| CartError::validation("cart total is out of range"))
    })
  }

  fn refresh(&mut self, now: DateTime<Utc>) -> CartResult<()> {
    self.total = self.computed_total()?;
    self.updated_at = now;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal::Decimal;

  fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
  }

  fn owner() -> CallerIdentity {
    CallerIdentity::new("u1").unwrap()
  }

  fn mousepad() -> ProductSnapshot {
    ProductSnapshot::new(ProductId::new_random(), "Mousepad", Decimal::new(4990, 2))
  }

  #[test]
  fn create_computes_total() {
    let product = mousepad();
    let cart = Cart::create(owner(), &product, qty(2), Utc::now()).unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total, Decimal::new(9980, 2));
  }

  #[test]
  fn add_existing_product_keeps_snapshot() {
    let product = mousepad();
    let mut cart = Cart::create(owner(), &product, qty(1), Utc::now()).unwrap();

    let repriced = ProductSnapshot::new(product.id, "Renamed", Decimal::new(1500, 2));
    cart.add(&repriced, qty(2), Utc::now()).unwrap();

    assert_eq!(cart.items.len(), 1);
    let line = &cart.items[0];
    assert_eq!(line.quantity, 3);
    assert_eq!(line.unit_price, Decimal::new(4990, 2));
    assert_eq!(line.display_name, "Mousepad");
    assert_eq!(cart.total, Decimal::new(14970, 2));
  }

  #[test]
  fn add_overflowing_quantity_is_rejected_without_change() {
    let product = mousepad();
    let mut cart = Cart::create(owner(), &product, qty(u32::MAX), Utc::now()).unwrap();
    let before = cart.clone();
    let err = cart.add(&product, qty(1), Utc::now()).unwrap_err();
    assert!(matches!(err, CartError::Validation(_)));
    assert_eq!(cart, before);
  }

  #[test]
  fn remove_last_item_leaves_empty_cart() {
    let product = mousepad();
    let mut cart = Cart::create(owner(), &product, qty(1), Utc::now()).unwrap();
    cart.remove(&product.id, Utc::now()).unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total, Decimal::ZERO);
    assert!(matches!(cart.remove(&product.id, Utc::now()), Err(CartError::ItemNotFound)));
  }

  #[test]
  fn set_quantity_on_missing_item_is_not_found() {
    let product = mousepad();
    let mut cart = Cart::create(owner(), &product, qty(1), Utc::now()).unwrap();
    let err = cart.set_quantity(&ProductId::new_random(), qty(5), Utc::now()).unwrap_err();
    assert!(matches!(err, CartError::ItemNotFound));
  }

  #[test]
  fn serializes_camel_case_with_string_decimals() {
    let product = mousepad();
    let cart = Cart::create(owner(), &product, qty(3), Utc::now()).unwrap();
    let json = serde_json::to_value(&cart).unwrap();
    assert_eq!(json["ownerId"], "u1");
    assert_eq!(json["total"], "149.70");
    assert_eq!(json["items"][0]["unitPrice"], "49.90");
    assert_eq!(json["items"][0]["displayName"], "Mousepad");
    assert!(json["updatedAt"].is_string());
  }
}
