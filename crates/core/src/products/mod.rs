//! Products module - the product aggregate and its store contract.

mod products_model;
mod products_traits;

pub use products_model::{Product, ProductProperty};
pub use products_traits::ProductRepositoryTrait;
