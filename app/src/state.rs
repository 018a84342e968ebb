// app/src/state.rs
use crate::config::AppConfig;
use cart_core::CartEngine;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppState {
  pub engine: Arc<CartEngine>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(engine: CartEngine, config: AppConfig) -> Self {
    Self {
      engine: Arc::new(engine),
      config: Arc::new(config),
    }
  }
}
