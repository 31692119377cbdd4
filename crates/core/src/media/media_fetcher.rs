//! Media fetcher seam.
//!
//! The pipeline never talks to the network directly; it dereferences image
//! URLs through this trait. The default implementation is a thin `reqwest`
//! wrapper with no retry and no timeout of its own - callers impose those.

use async_trait::async_trait;
use thiserror::Error;

use super::FetchedMedia;

/// Media fetch error types.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid media url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to fetch '{url}': {reason}")]
    FetchFailed { url: String, reason: String },
}

/// Contract for dereferencing a media URL to binary content.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchedMedia, MediaError>;
}

/// HTTP media fetcher backed by `reqwest`.
pub struct HttpMediaFetcher {
    client: reqwest::Client,
}

impl HttpMediaFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpMediaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaFetcher for HttpMediaFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchedMedia, MediaError> {
        let parsed = url::Url::parse(url).map_err(|e| MediaError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| MediaError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MediaError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?
            .to_vec();

        Ok(FetchedMedia {
            bytes,
            content_type,
        })
    }
}
