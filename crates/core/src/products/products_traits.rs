//! Trait for product store operations.

use async_trait::async_trait;

use super::Product;
use crate::utils::FoundOrCreated;
use crate::Result;

/// Contract for product persistence.
///
/// The slug is the uniqueness key; the store must enforce it, and
/// `find_by_slug_or_create` must treat a uniqueness violation on create as
/// "retry the find" when callers race.
#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    fn get_product(&self, id: &str) -> Result<Product>;
    fn get_by_slug(&self, slug: &str) -> Result<Option<Product>>;
    fn get_products(&self) -> Result<Vec<Product>>;
    async fn find_by_slug_or_create(&self, slug: &str) -> Result<FoundOrCreated<Product>>;
    /// Persists the aggregate; surfaces a store rejection (uniqueness or
    /// validation violation) as an error, never retries.
    async fn save(&self, product: Product) -> Result<Product>;
}
