//! Domain models for tax classification.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tax classification, keyed by the textual percentage value (e.g. "22").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCategory {
    pub id: String,
    pub name: String,
    pub tax_code: i32,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A tax rate owned by a category, keyed by the same percentage name.
/// `amount` is the percentage divided by one hundred.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    pub id: String,
    pub tax_category_id: String,
    pub name: String,
    pub amount: Decimal,
    pub zone_id: Option<String>,
    pub calculator_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A geographic zone a rate applies in. Supplied by the environment; the
/// pipeline only references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// A tax calculator a rate is bound to. Supplied by the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculator {
    pub id: String,
    pub name: String,
}

impl TaxCategory {
    pub fn new(name: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            tax_code: 0,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TaxRate {
    pub fn new(tax_category_id: &str, name: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            tax_category_id: tax_category_id.to_string(),
            name: name.to_string(),
            amount: Decimal::ZERO,
            zone_id: None,
            calculator_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Zone {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}

impl Calculator {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}
