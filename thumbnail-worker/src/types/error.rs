use media_storage::{bucket::BucketError, queue::QueueError};
use thiserror::Error;

use crate::worker::decoder::DecodeError;
use crate::worker::thumbnail::ThumbnailError;

/// Errors from the per-message pipeline
///
/// Every variant is terminal for its message: the dispatcher logs it and the
/// message stays in the queue for redelivery after the visibility timeout.
/// `Acknowledge` is the one case where the processing side effect already
/// happened and only the deletion failed, so a redelivered message may be
/// processed again.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The notification body could not be decoded
    #[error("Failed to decode notification")]
    Decode(#[from] DecodeError),

    /// The source object could not be fetched
    #[error("Failed to fetch source object")]
    Fetch(#[from] BucketError),

    /// The thumbnail could not be rendered
    #[error("Failed to render thumbnail")]
    Transform(#[from] ThumbnailError),

    /// The rendered thumbnail could not be stored
    #[error("Failed to store thumbnail")]
    Store(#[source] BucketError),

    /// Processing succeeded but the message could not be deleted
    #[error("Failed to acknowledge message")]
    Acknowledge(#[from] QueueError),
}
