//! Queue operations for the thumbnail worker
//!
//! This module provides functionality for interacting with the AWS SQS queue
//! that carries object-created notifications: provisioning, long-poll
//! configuration, receipt, and acknowledgment.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Error types for queue operations
pub mod error;
/// Object-event queue functionality
pub mod event_queue;
/// Common types for queue operations
pub mod types;

pub use error::{QueueError, QueueResult};
pub use event_queue::EventQueue;
pub use types::{QueueConfig, QueueMessage};
