/// Wrapper for received queue messages with delivery metadata
///
/// The body is carried raw; decoding it is the consumer's concern, so a
/// malformed body stays in the queue instead of being dropped at receipt.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    /// The raw message body
    pub body: String,
    /// Receipt handle for acknowledging the message. Changes on every
    /// receive; not a stable message identity.
    pub receipt_handle: String,
    /// Message ID, used for logging
    pub message_id: String,
}

/// Configuration for queue operations
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Queue URL
    pub queue_url: String,
    /// Maximum number of messages to retrieve per receive call
    pub max_messages: i32,
    /// Visibility timeout for received messages (in seconds)
    pub visibility_timeout: i32,
    /// Wait time for long polling (in seconds)
    pub wait_time_seconds: i32,
}
