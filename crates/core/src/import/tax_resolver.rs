//! Tax classification resolution.
//!
//! Maps an integer percentage to a tax category plus its rate, via
//! find-or-create keyed by the percentage's string form. The rate row is
//! always ensured (see DESIGN.md for the tax-rate-creation policy).

use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::taxes::{Calculator, TaxCategory, TaxRepositoryTrait, Zone};
use crate::Result;

/// Resolves tax categories and rates for the product resolver.
///
/// The zone and calculator a rate binds to are resolved once, at
/// construction ("first available" from the environment), never ad hoc
/// inside the stage.
pub struct TaxResolver {
    tax_repository: Arc<dyn TaxRepositoryTrait>,
    default_percent: i32,
    zone: Option<Zone>,
    calculator: Option<Calculator>,
}

impl TaxResolver {
    pub fn new(
        tax_repository: Arc<dyn TaxRepositoryTrait>,
        default_percent: i32,
        zone: Option<Zone>,
        calculator: Option<Calculator>,
    ) -> Self {
        Self {
            tax_repository,
            default_percent,
            zone,
            calculator,
        }
    }

    /// Builds a resolver with the first available zone and calculator.
    pub fn bootstrap(
        tax_repository: Arc<dyn TaxRepositoryTrait>,
        default_percent: i32,
    ) -> Result<Self> {
        let zone = tax_repository.get_zones()?.into_iter().next();
        let calculator = tax_repository.get_calculators()?.into_iter().next();
        Ok(Self::new(tax_repository, default_percent, zone, calculator))
    }

    /// Find-or-creates the tax category named by `percent`, refreshes its
    /// code and default flag, and ensures its rate row. Idempotent: a later
    /// row with the same percent converges on the same records.
    pub async fn resolve(&self, percent: i32) -> Result<TaxCategory> {
        let name = percent.to_string();

        let outcome = self.tax_repository.find_or_create_tax_category(&name).await?;
        if outcome.was_created() {
            debug!("created tax category '{}'", name);
        }
        let mut category = outcome.into_inner();
        category.tax_code = percent;
        category.is_default = percent == self.default_percent;
        let category = self.tax_repository.save_tax_category(category).await?;

        let mut rate = self
            .tax_repository
            .find_or_create_tax_rate(&category.id, &name)
            .await?
            .into_inner();
        rate.amount = Decimal::from(percent) * dec!(0.01);
        rate.zone_id = self.zone.as_ref().map(|zone| zone.id.clone());
        rate.calculator_id = self
            .calculator
            .as_ref()
            .map(|calculator| calculator.id.clone());
        self.tax_repository.save_tax_rate(rate).await?;

        Ok(category)
    }
}
