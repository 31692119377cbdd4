//! Repository implementation for products.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use shopflow_core::errors::StoreError;
use shopflow_core::products::{Product, ProductRepositoryTrait};
use shopflow_core::utils::FoundOrCreated;
use shopflow_core::Result;

use crate::lock;

/// In-memory product store, unique by slug.
#[derive(Default)]
pub struct InMemoryProductRepository {
    records: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepositoryTrait for InMemoryProductRepository {
    fn get_product(&self, id: &str) -> Result<Product> {
        lock(&self.records)
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("product {}", id)).into())
    }

    fn get_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        Ok(lock(&self.records)
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    fn get_products(&self) -> Result<Vec<Product>> {
        Ok(lock(&self.records).clone())
    }

    async fn find_by_slug_or_create(&self, slug: &str) -> Result<FoundOrCreated<Product>> {
        let mut records = lock(&self.records);
        if let Some(existing) = records.iter().find(|p| p.slug == slug) {
            return Ok(FoundOrCreated::Found(existing.clone()));
        }
        let product = Product::new(slug);
        records.push(product.clone());
        Ok(FoundOrCreated::Created(product))
    }

    async fn save(&self, mut product: Product) -> Result<Product> {
        let mut records = lock(&self.records);
        if records
            .iter()
            .any(|p| p.slug == product.slug && p.id != product.id)
        {
            return Err(
                StoreError::UniqueViolation(format!("product slug '{}'", product.slug)).into(),
            );
        }
        product.updated_at = Utc::now().naive_utc();
        match records.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => records.push(product.clone()),
        }
        Ok(product)
    }
}
