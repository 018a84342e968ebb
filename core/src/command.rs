// core/src/command.rs

//! Request validation.
//!
//! Transports hand over whatever they received (`*Request`, every field optional) and
//! get back a typed command or a `CartError::Validation`. Checks run in a fixed order:
//! presence, quantity sign, quantity range, product id syntax.

use serde::Deserialize;
use std::num::NonZeroU32;

use crate::error::{CartError, CartResult};
use crate::model::{CallerIdentity, ProductId};

pub const ADD_REQUIRED_MESSAGE: &str = "ownerId, productId and quantity are required";
pub const REMOVE_REQUIRED_MESSAGE: &str = "ownerId and productId are required";
pub const SET_REQUIRED_MESSAGE: &str = ADD_REQUIRED_MESSAGE;
pub const OWNER_REQUIRED_MESSAGE: &str = "ownerId is required";
pub const NON_POSITIVE_QUANTITY_MESSAGE: &str = "quantity must be greater than zero";
pub const QUANTITY_TOO_LARGE_MESSAGE: &str = "quantity is too large";
pub const INVALID_PRODUCT_ID_MESSAGE: &str = "productId is invalid";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
  pub product_id: Option<String>,
  pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
  pub product_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
  pub product_id: Option<String>,
  pub quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
  pub owner: CallerIdentity,
  pub product_id: ProductId,
  pub quantity: NonZeroU32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItem {
  pub owner: CallerIdentity,
  pub product_id: ProductId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetQuantity {
  pub owner: CallerIdentity,
  pub product_id: ProductId,
  pub quantity: NonZeroU32,
}

impl AddItemRequest {
  pub fn validate(self, owner: Option<CallerIdentity>) -> CartResult<AddItem> {
    let (owner, raw_product_id, raw_quantity) = match (owner, non_blank(self.product_id), self.quantity) {
      (Some(owner), Some(product_id), Some(quantity)) => (owner, product_id, quantity),
      _ => return Err(CartError::validation(ADD_REQUIRED_MESSAGE)),
    };
    let quantity = positive_quantity(raw_quantity)?;
    let product_id = parse_product_id(&raw_product_id)?;
    Ok(AddItem {
      owner,
      product_id,
      quantity,
    })
  }
}

impl RemoveItemRequest {
  pub fn validate(self, owner: Option<CallerIdentity>) -> CartResult<RemoveItem> {
    let (owner, raw_product_id) = match (owner, non_blank(self.product_id)) {
      (Some(owner), Some(product_id)) => (owner, product_id),
      _ => return Err(CartError::validation(REMOVE_REQUIRED_MESSAGE)),
    };
    let product_id = parse_product_id(&raw_product_id)?;
    Ok(RemoveItem { owner, product_id })
  }
}

impl SetQuantityRequest {
  pub fn validate(self, owner: Option<CallerIdentity>) -> CartResult<SetQuantity> {
    let (owner, raw_product_id, raw_quantity) = match (owner, non_blank(self.product_id), self.quantity) {
      (Some(owner), Some(product_id), Some(quantity)) => (owner, product_id, quantity),
      _ => return Err(CartError::validation(SET_REQUIRED_MESSAGE)),
    };
    let quantity = positive_quantity(raw_quantity)?;
    let product_id = parse_product_id(&raw_product_id)?;
    Ok(SetQuantity {
      owner,
      product_id,
      quantity,
    })
  }
}

/// Read and delete only need an owner.
pub fn require_owner(owner: Option<CallerIdentity>) -> CartResult<CallerIdentity> {
  owner.ok_or_else(|| CartError::validation(OWNER_REQUIRED_MESSAGE))
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

fn positive_quantity(raw: i64) -> CartResult<NonZeroU32> {
  if raw <= 0 {
    return Err(CartError::validation(NON_POSITIVE_QUANTITY_MESSAGE));
  }
  u32::try_from(raw)
    .ok()
    .and_then(NonZeroU32::new)
    .ok_or_else(|| CartError::validation(QUANTITY_TOO_LARGE_MESSAGE))
}

fn parse_product_id(raw: &str) -> CartResult<ProductId> {
  raw
    .parse::<ProductId>()
    .map_err(|_| CartError::validation(INVALID_PRODUCT_ID_MESSAGE))
}
