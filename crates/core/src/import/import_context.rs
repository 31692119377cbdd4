//! Per-row pipeline context.

use crate::media::MediaAsset;
use crate::products::Product;
use crate::rows::RawRow;
use crate::taxonomies::Taxon;
use crate::{Error, Result};

use super::RowFields;

/// Mutable context threaded through the pipeline stages for one row.
/// Created per row by the orchestrator and discarded after the row
/// completes.
///
/// Keys are written strictly forward: the field extractor writes `fields`,
/// the product resolver writes `product`, the taxonomy resolver and media
/// attacher update `product` and record what they attached.
#[derive(Debug, Clone)]
pub struct ImportContext {
    pub row: RawRow,
    pub fields: Option<RowFields>,
    pub product: Option<Product>,
    /// Whether the product resolver created the record (vs. found it).
    pub product_created: bool,
    /// Taxons newly attached to the product by this row.
    pub attached_taxons: Vec<Taxon>,
    /// Media asset attached by this row, if any.
    pub attached_media: Option<MediaAsset>,
}

impl ImportContext {
    pub fn new(row: RawRow) -> Self {
        Self {
            row,
            fields: None,
            product: None,
            product_created: false,
            attached_taxons: Vec::new(),
            attached_media: None,
        }
    }

    /// The extracted fields; an error if the field extractor has not run.
    pub fn fields(&self) -> Result<&RowFields> {
        self.fields
            .as_ref()
            .ok_or_else(|| Error::Unexpected("row fields have not been extracted".to_string()))
    }

    /// Takes the resolved product out of the context for mutation; an error
    /// if the product resolver has not run.
    pub fn take_product(&mut self) -> Result<Product> {
        self.product
            .take()
            .ok_or_else(|| Error::Unexpected("product has not been resolved".to_string()))
    }
}
