//! Import service - composes the pipeline stages.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SHIPPING_CATEGORY, DEFAULT_TAX_PERCENT};
use crate::media::MediaFetcher;
use crate::products::ProductRepositoryTrait;
use crate::rows::RawRow;
use crate::shipping::ShippingRepositoryTrait;
use crate::taxes::TaxRepositoryTrait;
use crate::taxonomies::TaxonomyRepositoryTrait;
use crate::Result;

use super::{FieldExtractor, ImportContext, MediaAttacher, ProductResolver, TaxResolver, TaxonomyResolver};

/// Ambient configuration for the pipeline, injected at construction.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Sentinel availability date used when `Product Published` is missing
    /// or unparsable ("available yesterday").
    pub available_on_fallback: NaiveDate,
    /// Percentage applied when `Tax Class` is missing or unparsable.
    pub default_tax_percent: i32,
    /// Name of the shipping classification assigned to every product.
    pub default_shipping_name: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self {
            available_on_fallback: today.checked_sub_days(Days::new(1)).unwrap_or(today),
            default_tax_percent: DEFAULT_TAX_PERCENT,
            default_shipping_name: DEFAULT_SHIPPING_CATEGORY.to_string(),
        }
    }
}

/// Summary of a batch import.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Total number of rows in the batch.
    pub total: u32,
    /// Rows processed end to end.
    pub imported: u32,
    /// Rows whose product record was created by this batch.
    pub created: u32,
    /// Rows whose product record already existed and was updated.
    pub updated: u32,
    /// Rows that failed.
    pub failed: u32,
    pub failures: Vec<RowFailure>,
}

/// One failed row in a batch, with enough context to log and continue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFailure {
    /// 1-based data row number (header excluded).
    pub row_number: u32,
    pub error: String,
}

/// Service driving the four pipeline stages over rows.
pub struct ImportService {
    field_extractor: FieldExtractor,
    product_resolver: ProductResolver,
    taxonomy_resolver: TaxonomyResolver,
    media_attacher: MediaAttacher,
}

impl ImportService {
    /// Builds the pipeline with injected store and fetcher dependencies.
    ///
    /// Ambient lookups (shipping classification, tax zone/calculator,
    /// taxonomy roots) are resolved here, once.
    pub async fn new(
        product_repository: Arc<dyn ProductRepositoryTrait>,
        taxonomy_repository: Arc<dyn TaxonomyRepositoryTrait>,
        tax_repository: Arc<dyn TaxRepositoryTrait>,
        shipping_repository: Arc<dyn ShippingRepositoryTrait>,
        media_fetcher: Arc<dyn MediaFetcher>,
        options: ImportOptions,
    ) -> Result<Self> {
        let tax_resolver = TaxResolver::bootstrap(tax_repository, options.default_tax_percent)?;
        let product_resolver = ProductResolver::new(
            product_repository.clone(),
            shipping_repository,
            tax_resolver,
            &options,
        )?;
        let taxonomy_resolver =
            TaxonomyResolver::new(product_repository.clone(), taxonomy_repository).await?;
        let media_attacher = MediaAttacher::new(product_repository, media_fetcher);

        Ok(Self {
            field_extractor: FieldExtractor::new(options),
            product_resolver,
            taxonomy_resolver,
            media_attacher,
        })
    }

    /// Processes one row through all four stages, fail-fast.
    ///
    /// A taxonomy or media failure does not roll back the product write
    /// that already committed; no cross-stage transaction is assumed.
    pub async fn process_row(&self, row: &RawRow) -> Result<ImportContext> {
        let mut ctx = ImportContext::new(row.clone());
        self.field_extractor.call(&mut ctx)?;
        self.product_resolver.call(&mut ctx).await?;
        self.taxonomy_resolver.call(&mut ctx).await?;
        self.media_attacher.call(&mut ctx).await?;
        Ok(ctx)
    }

    /// Processes a batch with log-and-continue semantics: a failed row is
    /// recorded in the report and the batch moves on.
    pub async fn import_rows(&self, rows: &[RawRow]) -> ImportReport {
        let mut report = ImportReport {
            total: rows.len() as u32,
            ..Default::default()
        };

        for (index, row) in rows.iter().enumerate() {
            let row_number = (index + 1) as u32;
            match self.process_row(row).await {
                Ok(ctx) => {
                    report.imported += 1;
                    if ctx.product_created {
                        report.created += 1;
                    } else {
                        report.updated += 1;
                    }
                }
                Err(err) => {
                    warn!("row {} failed: {}", row_number, err);
                    report.failed += 1;
                    report.failures.push(RowFailure {
                        row_number,
                        error: err.to_string(),
                    });
                }
            }
        }

        debug!(
            "import finished: {} imported ({} created, {} updated), {} failed",
            report.imported, report.created, report.updated, report.failed
        );
        report
    }
}
