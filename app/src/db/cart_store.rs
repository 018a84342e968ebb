// app/src/db/cart_store.rs

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use cart_core::{CallerIdentity, Cart, CartStore, LineItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

#[derive(Debug, FromRow)]
struct CartRow {
  owner_id: String,
  items: Json<Vec<LineItem>>,
  total: Decimal,
  updated_at: DateTime<Utc>,
}

impl TryFrom<CartRow> for Cart {
  type Error = anyhow::Error;

  fn try_from(row: CartRow) -> anyhow::Result<Self> {
    let owner_id = CallerIdentity::new(&row.owner_id).ok_or_else(|| anyhow!("cart row has a blank owner_id"))?;
    Ok(Cart {
      owner_id,
      items: row.items.0,
      total: row.total,
      updated_at: row.updated_at,
    })
  }
}

/// Carts stored one row per owner in the `carts` table.
#[derive(Debug, Clone)]
pub struct PgCartStore {
  pool: PgPool,
}

impl PgCartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CartStore for PgCartStore {
  async fn find(&self, owner: &CallerIdentity) -> anyhow::Result<Option<Cart>> {
    let row: Option<CartRow> =
      sqlx::query_as("SELECT owner_id, items, total, updated_at FROM carts WHERE owner_id = $1")
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("loading cart for owner '{}'", owner))?;
    row.map(Cart::try_from).transpose()
  }

  async fn insert(&self, cart: &Cart) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO carts (owner_id, items, total, updated_at) VALUES ($1, $2, $3, $4)")
      .bind(cart.owner_id.as_str())
      .bind(Json(&cart.items))
      .bind(cart.total)
      .bind(cart.updated_at)
      .execute(&self.pool)
      .await
      .with_context(|| format!("inserting cart for owner '{}'", cart.owner_id))?;
    Ok(())
  }

  async fn update_contents(&self, cart: &Cart) -> anyhow::Result<()> {
    let result = sqlx::query("UPDATE carts SET items = $2, total = $3, updated_at = $4 WHERE owner_id = $1")
      .bind(cart.owner_id.as_str())
      .bind(Json(&cart.items))
      .bind(cart.total)
      .bind(cart.updated_at)
      .execute(&self.pool)
      .await
      .with_context(|| format!("updating cart for owner '{}'", cart.owner_id))?;
    if result.rows_affected() != 1 {
      bail!("cart for owner '{}' disappeared before update", cart.owner_id);
    }
    Ok(())
  }

  async fn delete(&self, owner: &CallerIdentity) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM carts WHERE owner_id = $1")
      .bind(owner.as_str())
      .execute(&self.pool)
      .await
      .with_context(|| format!("deleting cart for owner '{}'", owner))?;
    Ok(result.rows_affected() > 0)
  }
}
