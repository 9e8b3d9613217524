//! Object-event queue operations
//!
//! This module handles the SQS queue carrying object-created notifications:
//! provisioning the queue, enabling long polling, and the
//! receive/acknowledge cycle the worker is built on.

use crate::queue::{
    error::{QueueError, QueueResult},
    types::{QueueConfig, QueueMessage},
};
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client as SqsClient;
use std::sync::Arc;

/// Queue of object-created notifications
pub struct EventQueue {
    sqs_client: Arc<SqsClient>,
    config: QueueConfig,
}

impl EventQueue {
    /// Creates a new event queue
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `config` - Queue configuration including URL and receive parameters
    #[must_use]
    pub const fn new(sqs_client: Arc<SqsClient>, config: QueueConfig) -> Self {
        Self { sqs_client, config }
    }

    /// Creates the queue if it does not already exist and returns its URL
    ///
    /// `CreateQueue` is idempotent: creating a queue that already exists
    /// (with the same attributes) returns the existing queue's URL.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Provision` if the service rejects the request
    /// and `QueueError::MissingQueueUrl` if the response carries no URL
    pub async fn ensure_queue(sqs_client: &SqsClient, queue_name: &str) -> QueueResult<String> {
        let result = sqs_client
            .create_queue()
            .queue_name(queue_name)
            .send()
            .await?;

        result
            .queue_url()
            .map(std::string::ToString::to_string)
            .ok_or(QueueError::MissingQueueUrl)
    }

    /// Enables server-side long polling on the queue
    ///
    /// Sets `ReceiveMessageWaitTimeSeconds` to the configured wait time so
    /// receives block on the server until a message arrives or the wait
    /// elapses.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Configure` if the service rejects the update
    pub async fn enable_long_polling(&self) -> QueueResult<()> {
        self.sqs_client
            .set_queue_attributes()
            .queue_url(&self.config.queue_url)
            .attributes(
                QueueAttributeName::ReceiveMessageWaitTimeSeconds,
                self.config.wait_time_seconds.to_string(),
            )
            .send()
            .await?;

        Ok(())
    }

    /// Polls messages from the queue
    ///
    /// Blocks on the server for up to the configured wait time; an empty
    /// vector on return means the wait elapsed without a message, which is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Receive` if the poll operation fails
    pub async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage>> {
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(self.config.max_messages)
            .visibility_timeout(self.config.visibility_timeout)
            .wait_time_seconds(self.config.wait_time_seconds)
            .send()
            .await?;

        let messages = result
            .messages()
            .iter()
            .filter_map(|msg| {
                let body = msg.body()?.to_string();
                let receipt_handle = msg.receipt_handle()?.to_string();
                let message_id = msg.message_id()?.to_string();

                Some(QueueMessage {
                    body,
                    receipt_handle,
                    message_id,
                })
            })
            .collect();

        Ok(messages)
    }

    /// Acknowledges receipt of a message by deleting it from the queue
    ///
    /// # Arguments
    ///
    /// * `receipt_handle` - The receipt handle from the received message
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Acknowledge` if the deletion fails, including
    /// when the receipt handle has gone stale past the visibility timeout
    pub async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        self.sqs_client
            .delete_message()
            .queue_url(&self.config.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }

    /// Sends a raw message body to the queue
    ///
    /// # Returns
    ///
    /// The message ID if successful or an empty string
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Send` if the send operation fails
    pub async fn send_message(&self, body: &str) -> QueueResult<String> {
        let result = self
            .sqs_client
            .send_message()
            .queue_url(&self.config.queue_url)
            .message_body(body)
            .send()
            .await?;

        Ok(result
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default())
    }
}
