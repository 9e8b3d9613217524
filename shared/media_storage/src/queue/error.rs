use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::create_queue::CreateQueueError;
use aws_sdk_sqs::operation::delete_message::DeleteMessageError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use aws_sdk_sqs::operation::set_queue_attributes::SetQueueAttributesError;
use thiserror::Error;

/// Result type alias for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error types for queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    /// Error creating the queue
    #[error("Failed to create queue")]
    Provision(#[from] SdkError<CreateQueueError>),

    /// Error configuring queue attributes
    #[error("Failed to configure long polling")]
    Configure(#[from] SdkError<SetQueueAttributesError>),

    /// Error receiving messages from SQS
    #[error("Failed to receive messages from SQS")]
    Receive(#[from] SdkError<ReceiveMessageError>),

    /// Error deleting a message from SQS
    #[error("Failed to delete message from SQS")]
    Acknowledge(#[from] SdkError<DeleteMessageError>),

    /// Error sending a message to SQS
    #[error("Failed to send message to SQS")]
    Send(#[from] SdkError<SendMessageError>),

    /// The service response did not include a queue URL
    #[error("Queue URL missing from create-queue response")]
    MissingQueueUrl,

    /// AWS SDK error outside a specific operation
    #[error("AWS SDK error: {0}")]
    Aws(String),
}
