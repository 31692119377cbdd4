//! Field extraction and validation - pipeline stage one.
//!
//! All parsing and defaulting of raw export fields happens here, once, so
//! schema drift stays isolated to this module. The stage is a pure read:
//! no store access, no side effects.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::constants::*;
use crate::rows::RawRow;
use crate::Result;

use super::import_service::ImportOptions;
use super::{ImportContext, ImportError};

/// Typed view over one raw row, produced by [`FieldExtractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub sku: String,
    pub slug: String,
    pub name: String,
    pub price: Decimal,
    pub published_on: NaiveDate,
    pub tax_percent: i32,
    pub is_published: bool,
    pub description: Option<String>,
    pub source_id: Option<String>,
    pub category_paths: Option<String>,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
}

impl RowFields {
    /// Extracts typed fields from a raw row.
    ///
    /// Required fields (`Product SKU`, `Slug`) fail with
    /// [`ImportError::MissingRequiredField`] when blank; numeric and date
    /// fields never fail - unparsable values take the documented defaults.
    pub fn extract(
        row: &RawRow,
        options: &ImportOptions,
    ) -> std::result::Result<Self, ImportError> {
        let sku = require(row, PRODUCT_SKU_KEY)?;
        let slug = require(row, PRODUCT_SLUG_KEY)?;

        Ok(Self {
            sku,
            slug,
            name: row.get(PRODUCT_NAME_KEY).unwrap_or_default().to_string(),
            price: parse_price(row.get(PRICE_KEY)),
            published_on: parse_published_on(
                row.get(PRODUCT_PUBLISHED_KEY),
                options.available_on_fallback,
            ),
            tax_percent: parse_tax_percent(row.get(TAX_CLASS_KEY), options.default_tax_percent),
            is_published: row.get(PRODUCT_STATUS_KEY) == Some(PUBLISHED_STATUS),
            description: row.get_present(EXCERPT_KEY).map(str::to_string),
            source_id: row.get_present(PRODUCT_ID_KEY).map(str::to_string),
            category_paths: row.get_present(CATEGORY_KEY).map(str::to_string),
            image_url: row.get_present(FEATURED_IMAGE_KEY).map(str::to_string),
            image_alt: row.get_present(FEATURED_IMAGE_ALT_KEY).map(str::to_string),
        })
    }
}

/// Pipeline stage wrapping [`RowFields::extract`]; writes `fields` into the
/// context.
pub struct FieldExtractor {
    options: ImportOptions,
}

impl FieldExtractor {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn call(&self, ctx: &mut ImportContext) -> Result<()> {
        let fields = RowFields::extract(&ctx.row, &self.options)?;
        ctx.fields = Some(fields);
        Ok(())
    }
}

fn require(row: &RawRow, field: &str) -> std::result::Result<String, ImportError> {
    row.get_present(field)
        .map(str::to_string)
        .ok_or_else(|| ImportError::MissingRequiredField {
            field: field.to_string(),
        })
}

/// Price: first comma replaced by a period, then a tolerant decimal parse.
/// Absent or unparsable values fall back to zero rather than failing.
fn parse_price(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };
    let normalized = raw.trim().replacen(',', ".", 1);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    parse_decimal_tolerant(&normalized, PRICE_KEY)
}

/// Attempts a plain decimal parse, then scientific notation, then falls
/// back to zero with a log line.
fn parse_decimal_tolerant(value: &str, field: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e_decimal) => match Decimal::from_scientific(value) {
            Ok(d) => d,
            Err(e_scientific) => {
                log::warn!(
                    "Failed to parse {} '{}': as decimal ({}), as scientific ({}). Falling back to zero.",
                    field,
                    value,
                    e_decimal,
                    e_scientific
                );
                Decimal::ZERO
            }
        },
    }
}

/// `Product Published` as `day/month/year`. Any missing or non-numeric
/// component, and any impossible calendar date, falls back to the sentinel.
fn parse_published_on(raw: Option<&str>, fallback: NaiveDate) -> NaiveDate {
    let Some(raw) = raw else {
        return fallback;
    };
    let mut parts = raw.trim().splitn(3, '/');
    let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next()) else {
        return fallback;
    };
    let (Ok(day), Ok(month), Ok(year)) = (
        day.trim().parse::<u32>(),
        month.trim().parse::<u32>(),
        year.trim().parse::<i32>(),
    ) else {
        return fallback;
    };
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(fallback)
}

/// `Tax Class` as an integer percentage; blank or unparsable values take
/// the default.
fn parse_tax_percent(raw: Option<&str>, default_percent: i32) -> i32 {
    let Some(raw) = raw else {
        return default_percent;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_percent;
    }
    match trimmed.parse::<i32>() {
        Ok(percent) => percent,
        Err(e) => {
            log::warn!(
                "Failed to parse {} '{}': {}. Falling back to {}.",
                TAX_CLASS_KEY,
                trimmed,
                e,
                default_percent
            );
            default_percent
        }
    }
}
