//! Taxonomy resolution - pipeline stage three.
//!
//! Expands the `Category` path expression into taxon nodes under the
//! "Categories" taxonomy, derives a brand facet from the product name, and
//! attaches the resolved taxons to the product. Paths are validated before
//! any node is created, so a malformed expression never leaves blank-named
//! nodes behind.

use std::sync::Arc;

use log::debug;

use crate::constants::{
    BRAND_SEPARATOR, BRAND_TAXONOMY, CATEGORIES_TAXONOMY, PATH_SEPARATOR, SEGMENT_SEPARATOR,
};
use crate::products::ProductRepositoryTrait;
use crate::taxonomies::{Taxon, Taxonomy, TaxonomyRepositoryTrait};
use crate::Result;

use super::{ImportContext, ImportError};

/// Resolves taxon attachments for one row.
///
/// Reads `fields` and `product` from the context; writes `product` (with
/// new associations persisted) and `attached_taxons`. A blank `Category`
/// field skips the whole stage, brand extraction included.
pub struct TaxonomyResolver {
    product_repository: Arc<dyn ProductRepositoryTrait>,
    taxonomy_repository: Arc<dyn TaxonomyRepositoryTrait>,
    categories: Taxonomy,
    brands: Taxonomy,
}

impl TaxonomyResolver {
    /// Find-or-creates the two taxonomy roots once, at construction.
    pub async fn new(
        product_repository: Arc<dyn ProductRepositoryTrait>,
        taxonomy_repository: Arc<dyn TaxonomyRepositoryTrait>,
    ) -> Result<Self> {
        let categories = taxonomy_repository
            .find_or_create_taxonomy(CATEGORIES_TAXONOMY)
            .await?;
        let brands = taxonomy_repository
            .find_or_create_taxonomy(BRAND_TAXONOMY)
            .await?;
        Ok(Self {
            product_repository,
            taxonomy_repository,
            categories,
            brands,
        })
    }

    pub async fn call(&self, ctx: &mut ImportContext) -> Result<()> {
        let fields = ctx.fields()?.clone();
        let Some(expression) = fields.category_paths.as_deref() else {
            return Ok(());
        };

        // Validate the whole expression up front; stores are untouched on a
        // malformed path.
        let paths = parse_category_paths(expression)?;

        let mut product = ctx.take_product()?;
        let mut attached = Vec::new();

        if let Some(brand) = brand_candidate(&fields.name) {
            let taxon = self
                .taxonomy_repository
                .find_or_create_child(&self.brands.root_taxon_id, &brand, &self.brands.id)
                .await?
                .into_inner();
            if product.add_taxon(&taxon.id) {
                attached.push(taxon);
            }
        }

        for path in &paths {
            let leaf = self.resolve_path(path).await?;
            if product.add_taxon(&leaf.id) {
                attached.push(leaf);
            }
        }

        debug!(
            "attached {} taxon(s) to product '{}'",
            attached.len(),
            product.slug
        );
        let saved = self.product_repository.save(product).await?;
        ctx.product = Some(saved);
        ctx.attached_taxons.extend(attached);
        Ok(())
    }

    /// Walks one path from the categories root, find-or-creating a child
    /// per segment, and returns the terminal node. Intermediate nodes are
    /// created as needed but only the leaf is attached.
    async fn resolve_path(&self, segments: &[String]) -> Result<Taxon> {
        let mut parent_id = self.categories.root_taxon_id.clone();
        let mut last = None;
        for segment in segments {
            let taxon = self
                .taxonomy_repository
                .find_or_create_child(&parent_id, segment, &self.categories.id)
                .await?
                .into_inner();
            parent_id = taxon.id.clone();
            last = Some(taxon);
        }
        last.ok_or_else(|| crate::Error::Unexpected("empty category path".to_string()))
    }
}

/// Splits `seg1>seg2|seg1b>seg2b` into alternative paths of trimmed
/// segments. An empty segment anywhere (consecutive delimiters, leading or
/// trailing delimiter, blank alternative) is an invalid path.
fn parse_category_paths(expression: &str) -> std::result::Result<Vec<Vec<String>>, ImportError> {
    let mut paths = Vec::new();
    for alternative in expression.split(PATH_SEPARATOR) {
        let mut segments = Vec::new();
        for segment in alternative.split(SEGMENT_SEPARATOR) {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(ImportError::InvalidCategoryPath {
                    path: expression.to_string(),
                });
            }
            segments.push(segment.to_string());
        }
        paths.push(segments);
    }
    Ok(paths)
}

/// Brand candidate from a product name: the part before the literal
/// `" – "` separator, trimmed and capitalized, when the separator splits
/// the name into more than one part.
fn brand_candidate(name: &str) -> Option<String> {
    let mut parts = name.split(BRAND_SEPARATOR);
    let first = parts.next()?;
    parts.next()?;
    let trimmed = first.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(capitalize(trimmed))
}

/// First character uppercased, the rest lowercased.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
