//! Trait for shipping classification lookups.

use async_trait::async_trait;

use super::ShippingCategory;
use crate::Result;

/// Contract for shipping classification lookups.
///
/// The pipeline resolves a named classification once at construction,
/// falling back to the first available one when the name is absent.
#[async_trait]
pub trait ShippingRepositoryTrait: Send + Sync {
    fn get_by_name(&self, name: &str) -> Result<Option<ShippingCategory>>;
    fn get_first(&self) -> Result<Option<ShippingCategory>>;
    async fn create(&self, name: &str) -> Result<ShippingCategory>;
}
