//! Domain model for the product aggregate.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::media::MediaAsset;

/// One catalog product, keyed for lookup by its URL slug.
///
/// The slug is the canonical identity for existing-record detection:
/// re-importing a row with a known slug mutates this record in place
/// (full-field overwrite), it never creates a second one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// `None` means "not available".
    pub available_on: Option<NaiveDate>,
    pub tax_category_id: Option<String>,
    pub shipping_category_id: Option<String>,
    pub meta_title: Option<String>,
    pub properties: Vec<ProductProperty>,
    /// Unordered set semantics; uniqueness enforced on attach.
    pub taxon_ids: Vec<String>,
    /// Attached media assets, ordered by position.
    pub media: Vec<MediaAsset>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A free-form key/value property attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProperty {
    pub key: String,
    pub value: String,
}

impl Product {
    /// A fresh record for the given slug, with defaults a first import will
    /// overwrite.
    pub fn new(slug: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            sku: String::new(),
            slug: slug.to_string(),
            name: String::new(),
            description: None,
            price: Decimal::ZERO,
            available_on: None,
            tax_category_id: None,
            shipping_category_id: None,
            meta_title: None,
            properties: Vec::new(),
            taxon_ids: Vec::new(),
            media: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Upserts a property by key.
    pub fn set_property(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|p| p.key == key) {
            Some(property) => property.value = value,
            None => self.properties.push(ProductProperty {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    pub fn has_taxon(&self, taxon_id: &str) -> bool {
        self.taxon_ids.iter().any(|id| id == taxon_id)
    }

    /// Attaches a taxon unless it is already attached.
    /// Returns whether the association was added.
    pub fn add_taxon(&mut self, taxon_id: &str) -> bool {
        if self.has_taxon(taxon_id) {
            return false;
        }
        self.taxon_ids.push(taxon_id.to_string());
        true
    }

    /// Attaches a media asset, keeping the list ordered by position.
    ///
    /// An asset with the same source URL replaces the existing one, so that
    /// re-importing a row does not pile up duplicate attachments.
    pub fn add_media(&mut self, asset: MediaAsset) {
        self.media.retain(|m| m.source_url != asset.source_url);
        self.media.push(asset);
        self.media.sort_by_key(|m| m.position);
    }
}
