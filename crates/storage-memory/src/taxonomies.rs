//! Repository implementation for taxonomies.

use std::sync::Mutex;

use async_trait::async_trait;

use shopflow_core::errors::StoreError;
use shopflow_core::taxonomies::{Taxon, Taxonomy, TaxonomyRepositoryTrait};
use shopflow_core::utils::FoundOrCreated;
use shopflow_core::Result;

use crate::lock;

/// In-memory taxonomy store.
///
/// Taxonomy names are unique; taxons are unique by
/// `(taxonomy_id, parent_id, name)`. Both find-or-create operations hold
/// one lock across the read-then-write, which is this store's way of
/// honoring the "uniqueness violation on create means retry the find"
/// contract.
#[derive(Default)]
pub struct InMemoryTaxonomyRepository {
    taxonomies: Mutex<Vec<Taxonomy>>,
    taxons: Mutex<Vec<Taxon>>,
}

impl InMemoryTaxonomyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All taxons of one taxonomy; handy for assertions and exports.
    pub fn get_taxons(&self, taxonomy_id: &str) -> Vec<Taxon> {
        lock(&self.taxons)
            .iter()
            .filter(|t| t.taxonomy_id == taxonomy_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TaxonomyRepositoryTrait for InMemoryTaxonomyRepository {
    fn get_taxonomy_by_name(&self, name: &str) -> Result<Option<Taxonomy>> {
        Ok(lock(&self.taxonomies)
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    fn get_taxon(&self, id: &str) -> Result<Taxon> {
        lock(&self.taxons)
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("taxon {}", id)).into())
    }

    fn get_children(&self, parent_id: &str) -> Result<Vec<Taxon>> {
        Ok(lock(&self.taxons)
            .iter()
            .filter(|t| t.parent_id.as_deref() == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn find_or_create_taxonomy(&self, name: &str) -> Result<Taxonomy> {
        let mut taxonomies = lock(&self.taxonomies);
        if let Some(existing) = taxonomies.iter().find(|t| t.name == name) {
            return Ok(existing.clone());
        }
        let (taxonomy, root) = Taxonomy::new(name);
        taxonomies.push(taxonomy.clone());
        lock(&self.taxons).push(root);
        Ok(taxonomy)
    }

    async fn find_or_create_child(
        &self,
        parent_id: &str,
        name: &str,
        taxonomy_id: &str,
    ) -> Result<FoundOrCreated<Taxon>> {
        let mut taxons = lock(&self.taxons);
        if let Some(existing) = taxons.iter().find(|t| {
            t.parent_id.as_deref() == Some(parent_id)
                && t.name == name
                && t.taxonomy_id == taxonomy_id
        }) {
            return Ok(FoundOrCreated::Found(existing.clone()));
        }
        let taxon = Taxon::new_child(taxonomy_id, parent_id, name);
        taxons.push(taxon.clone());
        Ok(FoundOrCreated::Created(taxon))
    }
}
