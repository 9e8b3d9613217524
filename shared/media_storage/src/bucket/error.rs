//! Error types for bucket operations

use aws_sdk_s3::{
    error::SdkError,
    operation::{get_object::GetObjectError, put_object::PutObjectError},
};
use thiserror::Error;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// Object does not exist in the bucket
    #[error("Object not found: {0}")]
    NotFound(String),

    /// S3 service error
    #[error("S3 service error: {0}")]
    Service(String),

    /// Failure reading the object byte stream
    #[error("Failed to read object body: {0}")]
    Read(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    Upstream(String),

    /// AWS SDK error
    #[error("AWS SDK error: {0}")]
    Aws(String),
}

impl From<SdkError<GetObjectError>> for BucketError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => Self::Service(err.err().to_string()),
            _ => Self::Aws(error.to_string()),
        }
    }
}

impl From<SdkError<PutObjectError>> for BucketError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => Self::Service(err.err().to_string()),
            _ => Self::Aws(error.to_string()),
        }
    }
}
