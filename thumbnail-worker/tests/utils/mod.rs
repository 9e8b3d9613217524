//! Recording fakes for the worker's trait seams

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat};
use media_storage::bucket::{BucketError, BucketResult};
use media_storage::queue::{QueueError, QueueMessage, QueueResult};
use serde_json::json;
use thumbnail_worker::types::error::HandlerError;
use thumbnail_worker::worker::decoder::ObjectRef;
use thumbnail_worker::worker::handler::HandleMessage;
use thumbnail_worker::worker::sink::ThumbnailSink;
use thumbnail_worker::worker::thumbnail::ThumbnailImage;
use thumbnail_worker::worker::{EventSource, MediaFetch};
use tokio_util::sync::CancellationToken;

/// One entry in the shared call log, in observed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Poll,
    Ack(String),
    Fetch(String),
    HandlerStart(String),
    HandlerDone(String),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn message_with_body(id: &str, body: &str) -> QueueMessage {
    QueueMessage {
        body: body.to_string(),
        receipt_handle: format!("receipt-{id}"),
        message_id: id.to_string(),
    }
}

pub fn message(id: &str) -> QueueMessage {
    message_with_body(id, &event_body("uploads", &format!("{id}.png")))
}

/// An object-created notification body in the shape the decoder consumes
pub fn event_body(bucket: &str, key: &str) -> String {
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

/// A small valid PNG for feeding the real thumbnailer
pub fn png_bytes(width: u32, height: u32) -> Bytes {
    let img = DynamicImage::new_rgb8(width, height);
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
        .expect("encoding test fixture");
    Bytes::from(buf)
}

/// Scripted queue: each poll pops the next scripted result and records a
/// `Poll` call. When the script runs dry the shutdown token is cancelled
/// and empty batches follow, so a dispatcher under test stops on its own.
pub struct ScriptedQueue {
    script: Mutex<VecDeque<QueueResult<Vec<QueueMessage>>>>,
    calls: CallLog,
    shutdown: CancellationToken,
    ack_fails: bool,
}

impl ScriptedQueue {
    pub fn new(
        script: Vec<QueueResult<Vec<QueueMessage>>>,
        calls: CallLog,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls,
            shutdown,
            ack_fails: false,
        }
    }

    /// Makes every delete attempt fail, as with a stale receipt handle
    pub fn with_failing_acks(mut self) -> Self {
        self.ack_fails = true;
        self
    }
}

#[async_trait]
impl EventSource for ScriptedQueue {
    async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage>> {
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(result) => {
                self.calls.lock().unwrap().push(Call::Poll);
                result
            }
            None => {
                self.shutdown.cancel();
                Ok(Vec::new())
            }
        }
    }

    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Ack(receipt_handle.to_string()));

        if self.ack_fails {
            return Err(QueueError::Aws("receipt handle is stale".to_string()));
        }

        Ok(())
    }
}

/// In-memory object store; anything not seeded fails with `NotFound`
pub struct FakeMediaStore {
    objects: HashMap<String, Bytes>,
    calls: CallLog,
}

impl FakeMediaStore {
    pub fn new(calls: CallLog) -> Self {
        Self {
            objects: HashMap::new(),
            calls,
        }
    }

    pub fn with_object(mut self, bucket: &str, key: &str, data: Bytes) -> Self {
        self.objects.insert(format!("{bucket}/{key}"), data);
        self
    }
}

#[async_trait]
impl MediaFetch for FakeMediaStore {
    async fn fetch(&self, bucket: &str, key: &str) -> BucketResult<Bytes> {
        let path = format!("{bucket}/{key}");
        self.calls.lock().unwrap().push(Call::Fetch(path.clone()));

        self.objects
            .get(&path)
            .cloned()
            .ok_or_else(|| BucketError::NotFound(format!("s3://{path}")))
    }
}

/// Sink that records every stored thumbnail
#[derive(Default)]
pub struct RecordingSink {
    pub stored: Mutex<Vec<(ObjectRef, ThumbnailImage)>>,
}

#[async_trait]
impl ThumbnailSink for RecordingSink {
    async fn store(&self, source: &ObjectRef, thumbnail: ThumbnailImage) -> BucketResult<()> {
        self.stored.lock().unwrap().push((source.clone(), thumbnail));
        Ok(())
    }
}

/// Handler stub that sleeps for a fixed delay, then records completion
pub struct StubHandler {
    pub delay: Duration,
    pub calls: CallLog,
}

#[async_trait]
impl HandleMessage for StubHandler {
    async fn handle(&self, message: QueueMessage) -> Result<(), HandlerError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::HandlerStart(message.message_id.clone()));

        tokio::time::sleep(self.delay).await;

        self.calls
            .lock()
            .unwrap()
            .push(Call::HandlerDone(message.message_id));

        Ok(())
    }
}
