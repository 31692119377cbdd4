//! Taxes module - tax classification records and their store contract.

mod tax_model;
mod tax_traits;

pub use tax_model::{Calculator, TaxCategory, TaxRate, Zone};
pub use tax_traits::TaxRepositoryTrait;
