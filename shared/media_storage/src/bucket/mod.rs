//! S3-based media bucket operations
mod error;

use std::sync::Arc;

use aws_sdk_s3::{
    error::SdkError, operation::get_object::GetObjectError, primitives::ByteStream,
    Client as S3Client,
};
use bytes::Bytes;
use tracing::debug;

pub use error::{BucketError, BucketResult};

/// Media store client for S3 byte retrieval and upload
///
/// Not bound to a single bucket: notifications name the bucket per object,
/// so every operation takes the bucket explicitly.
pub struct MediaStore {
    s3_client: Arc<S3Client>,
}

impl MediaStore {
    /// Creates a new media store client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }

    /// Fetches an object's bytes from a bucket
    ///
    /// # Arguments
    ///
    /// * `bucket` - Source bucket name
    /// * `key` - Object key within the bucket
    ///
    /// # Errors
    ///
    /// Returns `BucketError::NotFound` if the object does not exist,
    /// `BucketError::Upstream` for 5xx service errors, and other
    /// `BucketError` variants for permission or transport failures
    pub async fn fetch(&self, bucket: &str, key: &str) -> BucketResult<Bytes> {
        debug!("Fetching s3://{}/{}", bucket, key);

        let result = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), GetObjectError::NoSuchKey(_)) =>
            {
                return Err(BucketError::NotFound(format!("s3://{bucket}/{key}")));
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.raw().status().as_u16() >= 500 =>
            {
                return Err(BucketError::Upstream(format!("{service_err:?}")));
            }
            Err(e) => return Err(BucketError::from(e)),
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| BucketError::Read(e.to_string()))?;

        Ok(data.into_bytes())
    }

    /// Uploads an object's bytes to a bucket
    ///
    /// # Arguments
    ///
    /// * `bucket` - Destination bucket name
    /// * `key` - Object key within the bucket
    /// * `body` - Object bytes
    /// * `content_type` - MIME type stored with the object
    ///
    /// # Errors
    ///
    /// Returns `BucketError::Service` if the upload fails
    pub async fn store(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> BucketResult<()> {
        debug!("Storing {} bytes at s3://{}/{}", body.len(), bucket, key);

        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await?;

        Ok(())
    }
}
