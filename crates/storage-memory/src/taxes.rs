//! Repository implementation for tax categories, rates, and the
//! environment-supplied zones and calculators.

use std::sync::Mutex;

use async_trait::async_trait;

use shopflow_core::taxes::{Calculator, TaxCategory, TaxRate, TaxRepositoryTrait, Zone};
use shopflow_core::utils::FoundOrCreated;
use shopflow_core::Result;

use crate::lock;

/// In-memory tax store. Categories are unique by name, rates by
/// `(category, name)`.
#[derive(Default)]
pub struct InMemoryTaxRepository {
    categories: Mutex<Vec<TaxCategory>>,
    rates: Mutex<Vec<TaxRate>>,
    zones: Mutex<Vec<Zone>>,
    calculators: Mutex<Vec<Calculator>>,
}

impl InMemoryTaxRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an environment zone; insertion order defines "first
    /// available".
    pub fn add_zone(&self, name: &str) -> Zone {
        let zone = Zone::new(name);
        lock(&self.zones).push(zone.clone());
        zone
    }

    /// Registers an environment calculator; insertion order defines "first
    /// available".
    pub fn add_calculator(&self, name: &str) -> Calculator {
        let calculator = Calculator::new(name);
        lock(&self.calculators).push(calculator.clone());
        calculator
    }

    pub fn get_tax_categories(&self) -> Vec<TaxCategory> {
        lock(&self.categories).clone()
    }
}

#[async_trait]
impl TaxRepositoryTrait for InMemoryTaxRepository {
    fn get_tax_category_by_name(&self, name: &str) -> Result<Option<TaxCategory>> {
        Ok(lock(&self.categories)
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    fn get_tax_rates(&self, tax_category_id: &str) -> Result<Vec<TaxRate>> {
        Ok(lock(&self.rates)
            .iter()
            .filter(|r| r.tax_category_id == tax_category_id)
            .cloned()
            .collect())
    }

    fn get_zones(&self) -> Result<Vec<Zone>> {
        Ok(lock(&self.zones).clone())
    }

    fn get_calculators(&self) -> Result<Vec<Calculator>> {
        Ok(lock(&self.calculators).clone())
    }

    async fn find_or_create_tax_category(&self, name: &str) -> Result<FoundOrCreated<TaxCategory>> {
        let mut categories = lock(&self.categories);
        if let Some(existing) = categories.iter().find(|c| c.name == name) {
            return Ok(FoundOrCreated::Found(existing.clone()));
        }
        let category = TaxCategory::new(name);
        categories.push(category.clone());
        Ok(FoundOrCreated::Created(category))
    }

    async fn save_tax_category(&self, category: TaxCategory) -> Result<TaxCategory> {
        let mut categories = lock(&self.categories);
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category.clone(),
            None => categories.push(category.clone()),
        }
        Ok(category)
    }

    async fn find_or_create_tax_rate(
        &self,
        tax_category_id: &str,
        name: &str,
    ) -> Result<FoundOrCreated<TaxRate>> {
        let mut rates = lock(&self.rates);
        if let Some(existing) = rates
            .iter()
            .find(|r| r.tax_category_id == tax_category_id && r.name == name)
        {
            return Ok(FoundOrCreated::Found(existing.clone()));
        }
        let rate = TaxRate::new(tax_category_id, name);
        rates.push(rate.clone());
        Ok(FoundOrCreated::Created(rate))
    }

    async fn save_tax_rate(&self, rate: TaxRate) -> Result<TaxRate> {
        let mut rates = lock(&self.rates);
        match rates.iter_mut().find(|r| r.id == rate.id) {
            Some(existing) => *existing = rate.clone(),
            None => rates.push(rate.clone()),
        }
        Ok(rate)
    }
}
