//! External-service adapters for the thumbnail worker
//!
//! This crate provides the AWS-facing storage functionality shared by the
//! worker binary and its tooling: SQS queue operations for object-created
//! notifications and S3 bucket operations for media bytes.

pub mod bucket;
pub mod queue;
