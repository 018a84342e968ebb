// core/src/model/identity.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The owner of a cart, as resolved by whoever authenticated the caller.
///
/// Always non-empty and trimmed. The engine never looks at where the id came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerIdentity(String);

impl CallerIdentity {
  /// Returns `None` for empty or whitespace-only input.
  pub fn new(raw: impl AsRef<str>) -> Option<Self> {
    let trimmed = raw.as_ref().trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(CallerIdentity(trimmed.to_string()))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CallerIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for CallerIdentity {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
