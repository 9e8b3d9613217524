pub mod config;
pub mod decoder;
pub mod dispatcher;
pub mod handler;
pub mod sink;
pub mod thumbnail;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;
use bytes::Bytes;
use media_storage::bucket::{BucketResult, MediaStore};
use media_storage::queue::{EventQueue, QueueMessage, QueueResult};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::types::environment::Environment;

use self::config::WorkerConfig;
use self::dispatcher::Dispatcher;
use self::handler::{HandleMessage, MessageHandler};
use self::sink::{BucketSink, ThumbnailSink};
use self::thumbnail::Thumbnailer;

/// Result type for worker operations
pub type WorkerResult<T> = anyhow::Result<T>;

/// Source of object-created notifications
///
/// Seam over the queue adapter so tests can substitute a recording fake.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Receives the next batch of messages; empty on poll timeout
    async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage>>;

    /// Deletes a message so it is not redelivered
    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()>;
}

#[async_trait]
impl EventSource for EventQueue {
    async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage>> {
        EventQueue::poll_messages(self).await
    }

    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        EventQueue::ack_message(self, receipt_handle).await
    }
}

/// Byte retrieval from the object store
#[async_trait]
pub trait MediaFetch: Send + Sync {
    /// Fetches the object's bytes
    async fn fetch(&self, bucket: &str, key: &str) -> BucketResult<Bytes>;
}

#[async_trait]
impl MediaFetch for MediaStore {
    async fn fetch(&self, bucket: &str, key: &str) -> BucketResult<Bytes> {
        MediaStore::fetch(self, bucket, key).await
    }
}

/// Thumbnail worker: provisions the queue, then runs the dispatch loop
pub struct ThumbnailWorker {
    dispatcher: Dispatcher,
    shutdown_token: CancellationToken,
}

impl ThumbnailWorker {
    /// Creates a new thumbnail worker
    ///
    /// Ensures the queue exists and enables long polling before anything
    /// else. Either failure here is fatal: callers exit without a single
    /// receive having been issued.
    ///
    /// # Errors
    ///
    /// Returns an error if queue provisioning or configuration fails.
    pub async fn new(env: &Environment, config: WorkerConfig) -> WorkerResult<Self> {
        let aws_config = env.aws_config().await;
        let sqs_client = Arc::new(SqsClient::new(&aws_config));
        let s3_client = Arc::new(S3Client::new(&aws_config));

        info!("Ensuring queue {} exists", config.queue_name);
        let queue_url = EventQueue::ensure_queue(&sqs_client, &config.queue_name).await?;
        info!("Queue ready: {}", queue_url);

        let queue = Arc::new(EventQueue::new(
            sqs_client,
            config.queue_config(queue_url),
        ));
        queue.enable_long_polling().await?;
        info!("Enabled long polling on queue");

        let media_store = Arc::new(MediaStore::new(s3_client));
        let thumbnailer = Arc::new(Thumbnailer::new(config.thumbnail.clone()));
        let sink = Arc::new(BucketSink::new(
            Arc::clone(&media_store),
            config.thumbnail_key_prefix.clone(),
        ));

        let handler = Arc::new(MessageHandler::new(
            Arc::clone(&queue) as Arc<dyn EventSource>,
            media_store as Arc<dyn MediaFetch>,
            thumbnailer,
            sink as Arc<dyn ThumbnailSink>,
        ));

        let shutdown_token = CancellationToken::new();
        let dispatcher = Dispatcher::new(
            queue as Arc<dyn EventSource>,
            handler as Arc<dyn HandleMessage>,
            config.dispatch,
            shutdown_token.clone(),
        );

        Ok(Self {
            dispatcher,
            shutdown_token,
        })
    }

    /// Returns a clone of the shutdown token for external control
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs the dispatch loop until shutdown
    ///
    /// # Errors
    ///
    /// Steady-state message failures are logged, not returned; an error
    /// here means the loop itself could not run.
    pub async fn start(self) -> WorkerResult<()> {
        self.dispatcher.start().await;
        Ok(())
    }
}
