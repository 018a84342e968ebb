// core/src/model/mod.rs

//! Data structures for carts and the catalog references they hold.

pub mod cart;
pub mod identity;
pub mod product;

pub use cart::{Cart, LineItem};
pub use identity::CallerIdentity;
pub use product::{ProductId, ProductSnapshot};
