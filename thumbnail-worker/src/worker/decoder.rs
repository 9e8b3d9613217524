//! Decoding of object-created notification bodies
//!
//! Bodies follow the S3 event notification shape: a JSON object with a
//! `Records` array whose entries carry `s3.bucket.name` and `s3.object.key`.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Reference to the object a notification names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Source bucket name
    pub bucket: String,
    /// Object key within the bucket
    pub key: String,
}

/// Errors from notification decoding
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body is not well-formed JSON of the expected shape
    #[error("Notification body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The body carries no records
    #[error("Notification contains no records")]
    NoRecords,

    /// A required field is missing or empty
    #[error("Record is missing the {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Deserialize)]
struct ObjectCreatedEvent {
    #[serde(rename = "Records", default)]
    records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    #[serde(default)]
    s3: S3Entity,
}

#[derive(Debug, Default, Deserialize)]
struct S3Entity {
    #[serde(default)]
    bucket: BucketEntity,
    #[serde(default)]
    object: ObjectEntity,
}

#[derive(Debug, Default, Deserialize)]
struct BucketEntity {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ObjectEntity {
    #[serde(default)]
    key: String,
}

/// Parses a notification body into the object reference it names
///
/// Providers may batch several records into one notification; only the first
/// record is processed and the rest are skipped with a warning. This is a
/// deliberate policy, not a parsing gap: changing it would change which
/// objects a redelivery retries.
///
/// # Errors
///
/// Returns `DecodeError` when the body is malformed, carries no records, or
/// the first record lacks a bucket name or object key
pub fn decode(body: &str) -> Result<ObjectRef, DecodeError> {
    let event: ObjectCreatedEvent = serde_json::from_str(body)?;

    if event.records.len() > 1 {
        warn!(
            records = event.records.len(),
            "Notification carries multiple records, only the first is processed"
        );
    }

    let record = event
        .records
        .into_iter()
        .next()
        .ok_or(DecodeError::NoRecords)?;

    if record.s3.bucket.name.is_empty() {
        return Err(DecodeError::MissingField("bucket name"));
    }
    if record.s3.object.key.is_empty() {
        return Err(DecodeError::MissingField("object key"));
    }

    Ok(ObjectRef {
        bucket: record.s3.bucket.name,
        key: record.s3.object.key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn event_body(bucket: &str, key: &str) -> String {
        json!({
            "Records": [{
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": bucket },
                    "object": { "key": key }
                }
            }]
        })
        .to_string()
    }

    #[test]
    fn decodes_well_formed_notification() {
        let object = decode(&event_body("uploads", "photos/cat.png")).unwrap();

        assert_eq!(
            object,
            ObjectRef {
                bucket: "uploads".to_string(),
                key: "photos/cat.png".to_string(),
            }
        );
    }

    #[test]
    fn uses_only_the_first_record() {
        let body = json!({
            "Records": [
                { "s3": { "bucket": { "name": "first" }, "object": { "key": "a.png" } } },
                { "s3": { "bucket": { "name": "second" }, "object": { "key": "b.png" } } }
            ]
        })
        .to_string();

        let object = decode(&body).unwrap();
        assert_eq!(object.bucket, "first");
        assert_eq!(object.key, "a.png");
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            decode("not a notification"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_missing_records_field() {
        assert!(matches!(decode("{}"), Err(DecodeError::NoRecords)));
    }

    #[test]
    fn rejects_empty_records() {
        assert!(matches!(
            decode(r#"{"Records": []}"#),
            Err(DecodeError::NoRecords)
        ));
    }

    #[test]
    fn rejects_missing_bucket_name() {
        let body = json!({
            "Records": [{ "s3": { "object": { "key": "a.png" } } }]
        })
        .to_string();

        assert!(matches!(
            decode(&body),
            Err(DecodeError::MissingField("bucket name"))
        ));
    }

    #[test]
    fn rejects_empty_object_key() {
        let body = event_body("uploads", "");

        assert!(matches!(
            decode(&body),
            Err(DecodeError::MissingField("object key"))
        ));
    }
}
