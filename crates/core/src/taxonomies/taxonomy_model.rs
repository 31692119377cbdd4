//! Domain models for taxonomies.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A taxonomy is a named classification tree (e.g., "Categories", "Brand").
/// Its root taxon is created together with it and carries the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub id: String,
    pub name: String,
    pub root_taxon_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A node in a taxonomy tree (hierarchical via `parent_id`; the root has
/// none). Nodes are find-or-created lazily as paths are resolved and never
/// deleted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxon {
    pub id: String,
    pub taxonomy_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Taxonomy {
    /// A new taxonomy paired with its root taxon.
    pub fn new(name: &str) -> (Self, Taxon) {
        let now = Utc::now().naive_utc();
        let taxonomy_id = Uuid::new_v4().to_string();
        let root = Taxon {
            id: Uuid::new_v4().to_string(),
            taxonomy_id: taxonomy_id.clone(),
            parent_id: None,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        let taxonomy = Self {
            id: taxonomy_id,
            name: name.to_string(),
            root_taxon_id: root.id.clone(),
            created_at: now,
            updated_at: now,
        };
        (taxonomy, root)
    }
}

impl Taxon {
    pub fn new_child(taxonomy_id: &str, parent_id: &str, name: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            taxonomy_id: taxonomy_id.to_string(),
            parent_id: Some(parent_id.to_string()),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
