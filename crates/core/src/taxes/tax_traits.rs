//! Trait for tax store operations.

use async_trait::async_trait;

use super::{Calculator, TaxCategory, TaxRate, Zone};
use crate::utils::FoundOrCreated;
use crate::Result;

/// Contract for tax persistence.
///
/// Category names and `(category, rate name)` pairs are uniqueness keys the
/// store must enforce; find-or-create on either treats a uniqueness
/// violation on create as "retry the find".
#[async_trait]
pub trait TaxRepositoryTrait: Send + Sync {
    fn get_tax_category_by_name(&self, name: &str) -> Result<Option<TaxCategory>>;
    fn get_tax_rates(&self, tax_category_id: &str) -> Result<Vec<TaxRate>>;
    /// Environment-supplied zones, in "first available" order.
    fn get_zones(&self) -> Result<Vec<Zone>>;
    /// Environment-supplied calculators, in "first available" order.
    fn get_calculators(&self) -> Result<Vec<Calculator>>;
    async fn find_or_create_tax_category(&self, name: &str) -> Result<FoundOrCreated<TaxCategory>>;
    async fn save_tax_category(&self, category: TaxCategory) -> Result<TaxCategory>;
    async fn find_or_create_tax_rate(
        &self,
        tax_category_id: &str,
        name: &str,
    ) -> Result<FoundOrCreated<TaxRate>>;
    async fn save_tax_rate(&self, rate: TaxRate) -> Result<TaxRate>;
}
