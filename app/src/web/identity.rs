// app/src/web/identity.rs

//! Resolving the caller's identity for cart requests.
//!
//! Authentication happens upstream; by the time a request reaches this service the
//! authenticated user id travels in the `X-User-ID` header. Some callers (test
//! harnesses, internal integrations) instead put `ownerId` in the JSON body, which is
//! honoured only when `ACCEPT_BODY_OWNER_ID` is enabled and no header is present. A
//! header that is present but unreadable or blank is rejected outright.

use actix_web::{FromRequest, HttpRequest};
use cart_core::CallerIdentity;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-ID";

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub identity: CallerIdentity,
}

/// Header-based identity for endpoints that also accept a body `ownerId`.
///
/// Absent header: `None`. A header that is present but unusable is a 401, never a
/// silent fallback to the body.
#[derive(Debug, Clone)]
pub struct OptionalAuthenticatedUser(pub Option<AuthenticatedUser>);

fn header_identity(req: &HttpRequest) -> Result<Option<AuthenticatedUser>, AppError> {
  let Some(value) = req.headers().get(USER_ID_HEADER) else {
    return Ok(None);
  };
  value
    .to_str()
    .ok()
    .and_then(CallerIdentity::new)
    .map(|identity| Some(AuthenticatedUser { identity }))
    .ok_or_else(|| {
      debug!("Rejecting unusable {} header.", USER_ID_HEADER);
      AppError::Unauthorized(format!("Invalid {} header", USER_ID_HEADER))
    })
}

impl FromRequest for OptionalAuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    futures_util::future::ready(header_identity(req).map(OptionalAuthenticatedUser))
  }
}

/// The authenticated identity wins; the body `ownerId` is a fallback when allowed.
pub fn resolve_owner(
  auth_user: Option<AuthenticatedUser>,
  body_owner_id: Option<&str>,
  config: &AppConfig,
) -> Option<CallerIdentity> {
  match auth_user {
    Some(user) => Some(user.identity),
    None if config.accept_body_owner_id => body_owner_id.and_then(CallerIdentity::new),
    None => None,
  }
}
