//! Product resolution - pipeline stage two.
//!
//! Find-or-creates the product aggregate by slug and overwrites every
//! imported field from the extracted row, so a re-import always makes the
//! stored record match the current row exactly.

use std::sync::Arc;

use log::debug;

use crate::constants::SOURCE_ID_PROPERTY;
use crate::products::ProductRepositoryTrait;
use crate::shipping::{ShippingCategory, ShippingRepositoryTrait};
use crate::Result;

use super::import_service::ImportOptions;
use super::{ImportContext, ImportError, TaxResolver};

/// Resolves and persists the product aggregate for one row.
///
/// Reads `fields` from the context; writes `product` and
/// `product_created`.
pub struct ProductResolver {
    product_repository: Arc<dyn ProductRepositoryTrait>,
    tax_resolver: TaxResolver,
    shipping_category: Option<ShippingCategory>,
}

impl ProductResolver {
    /// Resolves the shipping classification once: the one named in the
    /// options, falling back to the first available.
    pub fn new(
        product_repository: Arc<dyn ProductRepositoryTrait>,
        shipping_repository: Arc<dyn ShippingRepositoryTrait>,
        tax_resolver: TaxResolver,
        options: &ImportOptions,
    ) -> Result<Self> {
        let shipping_category = match shipping_repository.get_by_name(&options.default_shipping_name)? {
            Some(category) => Some(category),
            None => shipping_repository.get_first()?,
        };
        Ok(Self {
            product_repository,
            tax_resolver,
            shipping_category,
        })
    }

    pub async fn call(&self, ctx: &mut ImportContext) -> Result<()> {
        let fields = ctx.fields()?.clone();

        let outcome = self
            .product_repository
            .find_by_slug_or_create(&fields.slug)
            .await?;
        let created = outcome.was_created();
        let mut product = outcome.into_inner();

        let tax_category = self.tax_resolver.resolve(fields.tax_percent).await?;

        product.sku = fields.sku.clone();
        product.slug = fields.slug.clone();
        product.price = fields.price;
        product.available_on = fields.is_published.then_some(fields.published_on);
        product.shipping_category_id = self
            .shipping_category
            .as_ref()
            .map(|category| category.id.clone());
        product.name = fields.name.clone();
        product.description = fields.description.clone();
        product.tax_category_id = Some(tax_category.id);
        product.meta_title = Some(fields.name.clone());
        product.set_property(
            SOURCE_ID_PROPERTY,
            fields.source_id.clone().unwrap_or_default(),
        );

        let saved = self
            .product_repository
            .save(product)
            .await
            .map_err(|e| ImportError::PersistenceFailure {
                slug: fields.slug.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            "{} product '{}'",
            if created { "created" } else { "updated" },
            saved.slug
        );
        ctx.product = Some(saved);
        ctx.product_created = created;
        Ok(())
    }
}
