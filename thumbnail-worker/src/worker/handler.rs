//! Per-message processing pipeline

use std::sync::Arc;

use async_trait::async_trait;
use media_storage::queue::QueueMessage;
use tracing::{debug, info, instrument};

use super::decoder;
use super::sink::ThumbnailSink;
use super::thumbnail::Thumbnailer;
use super::{EventSource, MediaFetch};
use crate::types::error::HandlerError;

/// Processes one queue message to completion
#[async_trait]
pub trait HandleMessage: Send + Sync {
    /// Runs the full pipeline for one message
    ///
    /// # Errors
    ///
    /// Returns `HandlerError` naming the stage that failed
    async fn handle(&self, message: QueueMessage) -> Result<(), HandlerError>;
}

/// Message handler running decode, fetch, render, store, acknowledge
///
/// Any stage failure stops the pipeline immediately without deleting the
/// message, so the queue redelivers it after the visibility timeout. Only a
/// fully successful run reaches the delete.
pub struct MessageHandler {
    queue: Arc<dyn EventSource>,
    media: Arc<dyn MediaFetch>,
    thumbnailer: Arc<Thumbnailer>,
    sink: Arc<dyn ThumbnailSink>,
}

impl MessageHandler {
    /// Creates a new message handler
    #[must_use]
    pub fn new(
        queue: Arc<dyn EventSource>,
        media: Arc<dyn MediaFetch>,
        thumbnailer: Arc<Thumbnailer>,
        sink: Arc<dyn ThumbnailSink>,
    ) -> Self {
        Self {
            queue,
            media,
            thumbnailer,
            sink,
        }
    }
}

#[async_trait]
impl HandleMessage for MessageHandler {
    #[instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn handle(&self, message: QueueMessage) -> Result<(), HandlerError> {
        debug!("Message body: {}", message.body);

        let object = decoder::decode(&message.body)?;
        info!(
            bucket = %object.bucket,
            key = %object.key,
            "Decoded object-created notification"
        );

        let source = self.media.fetch(&object.bucket, &object.key).await?;
        let thumbnail = Arc::clone(&self.thumbnailer).generate_async(source).await?;

        self.sink
            .store(&object, thumbnail)
            .await
            .map_err(HandlerError::Store)?;

        self.queue.ack_message(&message.receipt_handle).await?;
        info!("Acknowledged message");

        Ok(())
    }
}
