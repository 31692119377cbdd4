//! Trait for taxonomy store operations.

use async_trait::async_trait;

use super::{Taxon, Taxonomy};
use crate::utils::FoundOrCreated;
use crate::Result;

/// Contract for taxonomy persistence.
///
/// The store must enforce uniqueness of the taxonomy name and of
/// `(taxonomy_id, parent_id, name)` for taxons; `find_or_create_child`
/// treats a uniqueness violation on create as "retry the find", so two
/// callers racing on a missing node converge on one record.
#[async_trait]
pub trait TaxonomyRepositoryTrait: Send + Sync {
    fn get_taxonomy_by_name(&self, name: &str) -> Result<Option<Taxonomy>>;
    fn get_taxon(&self, id: &str) -> Result<Taxon>;
    fn get_children(&self, parent_id: &str) -> Result<Vec<Taxon>>;
    /// Finds a taxonomy by name, creating it (together with its root taxon)
    /// if absent.
    async fn find_or_create_taxonomy(&self, name: &str) -> Result<Taxonomy>;
    /// Finds a child taxon by name under the given parent, creating it if
    /// absent.
    async fn find_or_create_child(
        &self,
        parent_id: &str,
        name: &str,
        taxonomy_id: &str,
    ) -> Result<FoundOrCreated<Taxon>>;
}
