//! Repository implementation for shipping classifications.

use std::sync::Mutex;

use async_trait::async_trait;

use shopflow_core::errors::StoreError;
use shopflow_core::shipping::{ShippingCategory, ShippingRepositoryTrait};
use shopflow_core::Result;

use crate::lock;

/// In-memory shipping classification store, unique by name.
#[derive(Default)]
pub struct InMemoryShippingRepository {
    records: Mutex<Vec<ShippingCategory>>,
}

impl InMemoryShippingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShippingRepositoryTrait for InMemoryShippingRepository {
    fn get_by_name(&self, name: &str) -> Result<Option<ShippingCategory>> {
        Ok(lock(&self.records)
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    fn get_first(&self) -> Result<Option<ShippingCategory>> {
        Ok(lock(&self.records).first().cloned())
    }

    async fn create(&self, name: &str) -> Result<ShippingCategory> {
        let mut records = lock(&self.records);
        if records.iter().any(|c| c.name == name) {
            return Err(StoreError::UniqueViolation(format!("shipping category '{}'", name)).into());
        }
        let category = ShippingCategory::new(name);
        records.push(category.clone());
        Ok(category)
    }
}
