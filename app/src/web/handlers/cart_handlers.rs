// app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use cart_core::command::OWNER_REQUIRED_MESSAGE;
use cart_core::{
  require_owner, AddItemOutcome, AddItemRequest, CallerIdentity, CartError, RemoveItemRequest, SetQuantityRequest,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::identity::{resolve_owner, OptionalAuthenticatedUser};

pub const CART_REMOVED_MESSAGE: &str = "Cart removed successfully";

// --- Request DTOs ---
// `ownerId` is only read when no `X-User-ID` header is present.

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddItemPayload {
  pub owner_id: Option<String>,
  #[serde(flatten)]
  pub request: AddItemRequest,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemPayload {
  pub owner_id: Option<String>,
  #[serde(flatten)]
  pub request: RemoveItemRequest,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityPayload {
  pub owner_id: Option<String>,
  #[serde(flatten)]
  pub request: SetQuantityRequest,
}

// --- Handler Implementations ---

#[instrument(name = "handler::add_item", skip_all)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  auth_user: OptionalAuthenticatedUser,
  payload: web::Json<AddItemPayload>,
) -> Result<HttpResponse, AppError> {
  let AddItemPayload { owner_id, request } = payload.into_inner();
  let owner = resolve_owner(auth_user.0, owner_id.as_deref(), &app_state.config);
  let cmd = request.validate(owner)?;

  match app_state.engine.add_item(cmd).await? {
    AddItemOutcome::Created(cart) => {
      info!(owner = %cart.owner_id, "Cart created.");
      Ok(HttpResponse::Created().json(cart))
    }
    AddItemOutcome::Updated(cart) => Ok(HttpResponse::Ok().json(cart)),
  }
}

#[instrument(name = "handler::remove_item", skip_all)]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  auth_user: OptionalAuthenticatedUser,
  payload: web::Json<RemoveItemPayload>,
) -> Result<HttpResponse, AppError> {
  let RemoveItemPayload { owner_id, request } = payload.into_inner();
  let owner = resolve_owner(auth_user.0, owner_id.as_deref(), &app_state.config);
  let cmd = request.validate(owner)?;

  let cart = app_state.engine.remove_item(cmd).await?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(name = "handler::set_quantity", skip_all)]
pub async fn set_quantity_handler(
  app_state: web::Data<AppState>,
  auth_user: OptionalAuthenticatedUser,
  payload: web::Json<SetQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  let SetQuantityPayload { owner_id, request } = payload.into_inner();
  let owner = resolve_owner(auth_user.0, owner_id.as_deref(), &app_state.config);
  let cmd = request.validate(owner)?;

  let cart = app_state.engine.set_quantity(cmd).await?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(name = "handler::get_cart", skip(app_state, path), fields(owner_id = %path.as_ref()))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let owner = require_owner(CallerIdentity::new(path.into_inner()))?;
  let cart = app_state.engine.get_cart(&owner).await?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(name = "handler::delete_cart", skip(app_state, path), fields(owner_id = %path.as_ref()))]
pub async fn delete_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let owner = require_owner(CallerIdentity::new(path.into_inner()))?;
  app_state.engine.delete_cart(&owner).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": CART_REMOVED_MESSAGE })))
}

/// `/carrinho` without an owner segment.
pub async fn missing_owner_handler() -> Result<HttpResponse, AppError> {
  Err(CartError::validation(OWNER_REQUIRED_MESSAGE).into())
}
