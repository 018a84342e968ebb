// tests/cart_properties.rs
//
// Invariants of a cart under arbitrary sequences of add / remove / set-quantity.

use cart_core::{CallerIdentity, Cart, CartError, ProductId, ProductSnapshot};
use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::num::NonZeroU32;

#[derive(Debug, Clone)]
enum Op {
  Add { product: usize, quantity: u32 },
  Remove { product: usize },
  Set { product: usize, quantity: u32 },
  Reprice { product: usize, cents: i64 },
}

fn op_strategy(products: usize) -> impl Strategy<Value = Op> {
  prop_oneof![
    (0..products, 1u32..50).prop_map(|(product, quantity)| Op::Add { product, quantity }),
    (0..products).prop_map(|product| Op::Remove { product }),
    (0..products, 1u32..50).prop_map(|(product, quantity)| Op::Set { product, quantity }),
    (0..products, 1i64..100_000).prop_map(|(product, cents)| Op::Reprice { product, cents }),
  ]
}

fn catalog(n: usize) -> Vec<ProductSnapshot> {
  (0..n)
    .map(|i| ProductSnapshot::new(ProductId::new_random(), format!("product-{}", i), Decimal::new(1000 + i as i64 * 95, 2)))
    .collect()
}

fn expected_total(cart: &Cart) -> Decimal {
  cart
    .items
    .iter()
    .map(|item| item.unit_price * Decimal::from(item.quantity))
    .sum()
}

proptest! {
  #[test]
  fn total_products_and_quantities_stay_consistent(ops in prop::collection::vec(op_strategy(4), 1..60)) {
    let mut products = catalog(4);
    let first_price: Vec<Decimal> = products.iter().map(|p| p.price).collect();
    let mut cart = Cart::create(
      CallerIdentity::new("prop-owner").unwrap(),
      &products[0],
      NonZeroU32::new(1).unwrap(),
      Utc::now(),
    )
    .unwrap();
    // Price each product had when its current line was created.
    let mut snapshot_price: Vec<Option<Decimal>> = vec![Some(first_price[0]), None, None, None];

    for op in ops {
      match op {
        Op::Add { product, quantity } => {
          let had_line = cart.find_item(&products[product].id).is_some();
          cart.add(&products[product], NonZeroU32::new(quantity).unwrap(), Utc::now()).unwrap();
          if !had_line {
            snapshot_price[product] = Some(products[product].price);
          }
        }
        Op::Remove { product } => {
          let result = cart.remove(&products[product].id, Utc::now());
          if snapshot_price[product].is_some() {
            prop_assert!(result.is_ok());
            snapshot_price[product] = None;
          } else {
            prop_assert!(matches!(result, Err(CartError::ItemNotFound)));
          }
        }
        Op::Set { product, quantity } => {
          let result = cart.set_quantity(&products[product].id, NonZeroU32::new(quantity).unwrap(), Utc::now());
          prop_assert_eq!(result.is_ok(), snapshot_price[product].is_some());
        }
        Op::Reprice { product, cents } => {
          products[product].price = Decimal::new(cents, 2);
        }
      }

      // P1: total is always the recomputed sum.
      prop_assert_eq!(cart.total, expected_total(&cart));
      // P2: no product appears twice.
      let distinct: HashSet<ProductId> = cart.items.iter().map(|i| i.product_id).collect();
      prop_assert_eq!(distinct.len(), cart.items.len());
      // I3: quantities stay positive.
      prop_assert!(cart.items.iter().all(|i| i.quantity > 0));
      // P3: each line keeps the price it was created with.
      for item in &cart.items {
        let idx = products.iter().position(|p| p.id == item.product_id).unwrap();
        prop_assert_eq!(Some(item.unit_price), snapshot_price[idx]);
      }
    }
  }
}
