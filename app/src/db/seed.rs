// app/src/db/seed.rs

//! Demo catalog loaded when `SEED_DB=true`.

use cart_core::{InMemoryCatalog, ProductId, ProductSnapshot};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::errors::Result;

#[derive(Debug, Clone, Copy)]
pub struct DemoProduct {
  pub name: &'static str,
  pub price_cents: i64,
  pub category: &'static str,
  pub description: &'static str,
  pub image_url: &'static str,
}

pub const DEMO_PRODUCTS: [DemoProduct; 4] = [
  DemoProduct {
    name: "Mousepad Ergonômico com Apoio de Pulso",
    price_cents: 4990,
    category: "Acessórios",
    description: "Apoio em gel para conforto.",
    image_url: "https://placehold.co/400x300?text=Mousepad",
  },
  DemoProduct {
    name: "Suporte Ajustável para Monitor",
    price_cents: 12990,
    category: "Suportes",
    description: "Elevador metálico com ajuste de altura.",
    image_url: "https://placehold.co/400x300?text=Suporte+Monitor",
  },
  DemoProduct {
    name: "Luz LED Regulável para Home Office",
    price_cents: 7990,
    category: "Iluminação",
    description: "3 temperaturas de cor e dimmer.",
    image_url: "https://placehold.co/400x300?text=Luz+LED",
  },
  DemoProduct {
    name: "Organizador de Mesa Modular",
    price_cents: 3990,
    category: "Organização",
    description: "Compartimentos para cabos e canetas.",
    image_url: "https://placehold.co/400x300?text=Organizador",
  },
];

impl DemoProduct {
  pub fn price(&self) -> Decimal {
    Decimal::new(self.price_cents, 2)
  }

  fn snapshot(&self) -> ProductSnapshot {
    ProductSnapshot::new(ProductId::new_random(), self.name, self.price())
  }
}

/// Replaces the whole `products` table with the demo catalog.
pub async fn seed_postgres(pool: &PgPool) -> Result<Vec<ProductSnapshot>> {
  let mut tx = pool.begin().await?;
  sqlx::query("DELETE FROM products").execute(&mut *tx).await?;

  let mut seeded = Vec::with_capacity(DEMO_PRODUCTS.len());
  for demo in DEMO_PRODUCTS.iter() {
    let product = demo.snapshot();
    sqlx::query(
      "INSERT INTO products (id, name, price, category, description, image_url) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(product.id.as_uuid())
    .bind(demo.name)
    .bind(product.price)
    .bind(demo.category)
    .bind(demo.description)
    .bind(demo.image_url)
    .execute(&mut *tx)
    .await?;
    seeded.push(product);
  }

  tx.commit().await?;
  log_seeded(&seeded);
  Ok(seeded)
}

pub fn seed_memory(catalog: &InMemoryCatalog) -> Vec<ProductSnapshot> {
  let seeded: Vec<ProductSnapshot> = DEMO_PRODUCTS.iter().map(DemoProduct::snapshot).collect();
  for product in &seeded {
    catalog.upsert(product.clone());
  }
  log_seeded(&seeded);
  seeded
}

fn log_seeded(products: &[ProductSnapshot]) {
  for product in products {
    info!(product_id = %product.id, price = %product.price, "Seeded product '{}'.", product.name);
  }
  info!("Seeded {} demo products.", products.len());
}
