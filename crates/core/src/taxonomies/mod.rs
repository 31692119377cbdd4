//! Taxonomies module - classification trees and their store contract.

mod taxonomy_model;
mod taxonomy_traits;

pub use taxonomy_model::{Taxon, Taxonomy};
pub use taxonomy_traits::TaxonomyRepositoryTrait;
