//! Media attachment - pipeline stage four.
//!
//! Dereferences the `Featured Image` URL through the fetcher seam, wraps
//! the content as a media asset, and appends it to the product's media
//! list. Independent of the taxonomy stage; only the resolved product is
//! required.

use std::sync::Arc;

use log::debug;

use crate::media::{MediaAsset, MediaFetcher};
use crate::products::ProductRepositoryTrait;
use crate::Result;

use super::{ImportContext, ImportError};

/// Attaches the row's featured image to the product, if any.
///
/// Reads `fields` and `product` from the context; writes `product` and
/// `attached_media`. A blank image field is a no-op.
pub struct MediaAttacher {
    product_repository: Arc<dyn ProductRepositoryTrait>,
    fetcher: Arc<dyn MediaFetcher>,
}

impl MediaAttacher {
    pub fn new(
        product_repository: Arc<dyn ProductRepositoryTrait>,
        fetcher: Arc<dyn MediaFetcher>,
    ) -> Self {
        Self {
            product_repository,
            fetcher,
        }
    }

    pub async fn call(&self, ctx: &mut ImportContext) -> Result<()> {
        let fields = ctx.fields()?.clone();
        let Some(url) = fields.image_url.as_deref() else {
            return Ok(());
        };

        let fetched =
            self.fetcher
                .fetch(url)
                .await
                .map_err(|e| ImportError::MediaFetchFailure {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        let mut product = ctx.take_product()?;
        let asset = MediaAsset::new(url, fields.image_alt.clone(), 0, fetched);
        product.add_media(asset.clone());

        debug!("attached media '{}' to product '{}'", url, product.slug);
        let saved = self.product_repository.save(product).await?;
        ctx.product = Some(saved);
        ctx.attached_media = Some(asset);
        Ok(())
    }
}
