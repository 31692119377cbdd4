//! Import module - the row-to-entity transformation pipeline.
//!
//! Four sequential stages process one export row: field extraction, product
//! resolution, taxonomy resolution, media attachment. Stages communicate
//! through an [`ImportContext`] built incrementally per row; each stage
//! declares what it reads and writes.

mod field_extractor;
mod import_context;
mod import_errors;
mod import_service;
mod media_attacher;
mod product_resolver;
mod tax_resolver;
mod taxonomy_resolver;

#[cfg(test)]
mod import_service_tests;

pub use field_extractor::{FieldExtractor, RowFields};
pub use import_context::ImportContext;
pub use import_errors::ImportError;
pub use import_service::{ImportOptions, ImportReport, ImportService, RowFailure};
pub use media_attacher::MediaAttacher;
pub use product_resolver::ProductResolver;
pub use tax_resolver::TaxResolver;
pub use taxonomy_resolver::TaxonomyResolver;
