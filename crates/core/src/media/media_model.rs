//! Domain models for media assets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Binary content obtained from a media fetcher, plus what the transport
/// knew about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMedia {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// A media asset attached to a product, ordered within the product by
/// `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: String,
    pub source_url: String,
    pub alt: Option<String>,
    pub position: i32,
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bytes: Vec<u8>,
}

impl MediaAsset {
    pub fn new(
        source_url: &str,
        alt: Option<String>,
        position: i32,
        fetched: FetchedMedia,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_url: source_url.to_string(),
            alt,
            position,
            content_type: fetched.content_type,
            bytes: fetched.bytes,
        }
    }
}
