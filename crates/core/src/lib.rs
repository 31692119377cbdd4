//! Shopflow Core - Domain entities, services, and traits.
//!
//! This crate contains the row-to-entity import pipeline for storefront
//! product exports. It is storage-agnostic and defines traits that are
//! implemented by the `storage-memory` crate (or any other store).

pub mod constants;
pub mod errors;
pub mod import;
pub mod media;
pub mod products;
pub mod rows;
pub mod shipping;
pub mod taxes;
pub mod taxonomies;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
