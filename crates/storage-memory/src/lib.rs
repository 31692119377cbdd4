//! In-memory storage implementation for Shopflow.
//!
//! This crate implements the repository traits defined in `shopflow-core`
//! with plain mutex-guarded collections. It is the reference store for the
//! import pipeline: every uniqueness contract the core expects from a real
//! database (product slug, taxonomy name, taxon `(taxonomy, parent, name)`,
//! tax category name, rate `(category, name)`) is enforced here, so tests
//! and embedding applications observe the same find-or-create semantics a
//! SQL-backed store would provide.
//!
//! All repositories are cheap to construct and safe to share behind `Arc`.

use std::sync::{Mutex, MutexGuard};

pub mod products;
pub mod shipping;
pub mod taxes;
pub mod taxonomies;

pub use products::InMemoryProductRepository;
pub use shipping::InMemoryShippingRepository;
pub use taxes::InMemoryTaxRepository;
pub use taxonomies::InMemoryTaxonomyRepository;

/// Locks a mutex, recovering the guard from a poisoned lock instead of
/// panicking. A poisoned store is still internally consistent for our
/// whole-record replace operations.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
