//! Output sink for rendered thumbnails
//!
//! Where derived artifacts land is the deliberately pluggable edge of this
//! worker: the consumed notification contract says nothing about it.
//! `ThumbnailSink` is the extension point; `BucketSink` is the provided
//! implementation, writing the JPEG back to the source bucket under a
//! derived key.

use std::sync::Arc;

use async_trait::async_trait;
use media_storage::bucket::{BucketResult, MediaStore};
use tracing::info;

use super::decoder::ObjectRef;
use super::thumbnail::ThumbnailImage;

/// Destination for rendered thumbnails
#[async_trait]
pub trait ThumbnailSink: Send + Sync {
    /// Stores a thumbnail derived from `source`
    async fn store(&self, source: &ObjectRef, thumbnail: ThumbnailImage) -> BucketResult<()>;
}

/// Sink writing thumbnails back to the source bucket under a key prefix
pub struct BucketSink {
    media_store: Arc<MediaStore>,
    key_prefix: String,
}

impl BucketSink {
    /// Creates a sink writing under `key_prefix` in the source bucket
    #[must_use]
    pub const fn new(media_store: Arc<MediaStore>, key_prefix: String) -> Self {
        Self {
            media_store,
            key_prefix,
        }
    }
}

fn derived_key(key_prefix: &str, source_key: &str) -> String {
    format!("{key_prefix}{source_key}.jpg")
}

#[async_trait]
impl ThumbnailSink for BucketSink {
    async fn store(&self, source: &ObjectRef, thumbnail: ThumbnailImage) -> BucketResult<()> {
        let key = derived_key(&self.key_prefix, &source.key);

        self.media_store
            .store(&source.bucket, &key, thumbnail.data, "image/jpeg")
            .await?;

        info!(
            bucket = %source.bucket,
            key = %key,
            width = thumbnail.width,
            height = thumbnail.height,
            "Stored thumbnail"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_key_under_prefix() {
        assert_eq!(
            derived_key("thumbnails/", "photos/cat.png"),
            "thumbnails/photos/cat.png.jpg"
        );
    }
}
