use media_storage::queue::QueueConfig;

use super::dispatcher::DispatchConfig;
use super::thumbnail::ThumbnailConfig;

/// SQS caps receive batches at 10 messages
const DEFAULT_MAX_MESSAGES: i32 = 10;
/// Long enough to cover fetch, render, and store for one message
const DEFAULT_VISIBILITY_TIMEOUT: i32 = 60;
/// Key prefix for thumbnails written back to the source bucket
const DEFAULT_THUMBNAIL_KEY_PREFIX: &str = "thumbnails/";

/// Configuration for the thumbnail worker
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Name of the queue carrying object-created notifications
    pub queue_name: String,
    /// Long-poll wait time in seconds
    pub wait_time_seconds: i32,
    /// Maximum messages per receive call
    pub max_messages: i32,
    /// Visibility timeout for received messages, in seconds
    pub visibility_timeout: i32,
    /// Dispatch loop tunables
    pub dispatch: DispatchConfig,
    /// Thumbnail rendering parameters
    pub thumbnail: ThumbnailConfig,
    /// Key prefix for thumbnails written back to the bucket
    pub thumbnail_key_prefix: String,
}

impl WorkerConfig {
    /// Creates a config with the given queue settings and stock defaults
    /// for everything else
    #[must_use]
    pub fn new(queue_name: String, wait_time_seconds: i32) -> Self {
        Self {
            queue_name,
            wait_time_seconds,
            max_messages: DEFAULT_MAX_MESSAGES,
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
            dispatch: DispatchConfig::default(),
            thumbnail: ThumbnailConfig::default(),
            thumbnail_key_prefix: DEFAULT_THUMBNAIL_KEY_PREFIX.to_string(),
        }
    }

    /// Queue configuration for the provisioned queue URL
    #[must_use]
    pub fn queue_config(&self, queue_url: String) -> QueueConfig {
        QueueConfig {
            queue_url,
            max_messages: self.max_messages,
            visibility_timeout: self.visibility_timeout,
            wait_time_seconds: self.wait_time_seconds,
        }
    }
}
