//! Dispatch loop: long-poll the queue, fan out handlers, join the batch

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use media_storage::queue::QueueMessage;
use rand::Rng;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::handler::HandleMessage;
use super::EventSource;

/// Tunables for the dispatch loop
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Cap on concurrently executing handlers, sized to the receive batch
    pub max_in_flight: usize,
    /// Initial delay before retrying a failed receive, in milliseconds
    pub receive_backoff_ms: u64,
    /// Ceiling for the receive retry delay, in milliseconds
    pub max_receive_backoff_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 10,
            receive_backoff_ms: 100,
            max_receive_backoff_ms: 30_000,
        }
    }
}

/// Drives the consume-dispatch-acknowledge loop
pub struct Dispatcher {
    queue: Arc<dyn EventSource>,
    handler: Arc<dyn HandleMessage>,
    limiter: Arc<Semaphore>,
    config: DispatchConfig,
    shutdown: CancellationToken,
}

impl Dispatcher {
    /// Creates a new dispatcher
    #[must_use]
    pub fn new(
        queue: Arc<dyn EventSource>,
        handler: Arc<dyn HandleMessage>,
        config: DispatchConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            queue,
            handler,
            limiter: Arc::new(Semaphore::new(config.max_in_flight)),
            config,
            shutdown,
        }
    }

    /// Runs the loop until the shutdown token is cancelled
    ///
    /// Receive failures are logged and retried with capped exponential
    /// backoff plus jitter, reset on the next successful receive; they never
    /// terminate the loop. A batch in flight always drains before the next
    /// receive is issued.
    pub async fn start(self) {
        info!("Starting dispatcher");

        let mut backoff_ms = self.config.receive_backoff_ms;

        while !self.shutdown.is_cancelled() {
            let batch = tokio::select! {
                result = self.queue.poll_messages() => result,
                () = self.shutdown.cancelled() => {
                    info!("Dispatcher shutting down");
                    break;
                }
            };

            match batch {
                Ok(messages) => {
                    backoff_ms = self.config.receive_backoff_ms;

                    if messages.is_empty() {
                        continue;
                    }

                    info!("Received {} messages", messages.len());
                    self.dispatch_batch(messages).await;
                }
                Err(e) => {
                    error!(
                        error = ?e,
                        "Failed to receive messages, retrying in {}ms", backoff_ms
                    );

                    tokio::select! {
                        () = sleep(Duration::from_millis(with_jitter(backoff_ms))) => {}
                        () = self.shutdown.cancelled() => {
                            info!("Dispatcher shutting down during receive retry");
                            break;
                        }
                    }

                    backoff_ms = (backoff_ms * 2).min(self.config.max_receive_backoff_ms);
                }
            }
        }

        info!("Dispatcher stopped");
    }

    /// Launches one handler task per message and waits for the whole batch
    ///
    /// Tasks are spawned up front so launch never blocks on a slow sibling;
    /// each task acquires a limiter permit before its handler runs, keeping
    /// execution concurrency bounded. The join is the loop's only barrier:
    /// no receive is issued until every task here has completed.
    async fn dispatch_batch(&self, messages: Vec<QueueMessage>) {
        let handles: Vec<_> = messages
            .into_iter()
            .map(|message| {
                let handler = Arc::clone(&self.handler);
                let limiter = Arc::clone(&self.limiter);

                tokio::spawn(async move {
                    // The limiter is never closed, so acquire cannot fail
                    let Ok(_permit) = limiter.acquire_owned().await else {
                        return;
                    };

                    let message_id = message.message_id.clone();
                    if let Err(e) = handler.handle(message).await {
                        error!(
                            message_id = %message_id,
                            error = ?e,
                            "Failed to process message"
                        );
                    }
                })
            })
            .collect();

        for result in join_all(handles).await {
            if let Err(e) = result {
                error!(error = ?e, "Handler task panicked");
            }
        }
    }
}

fn with_jitter(delay_ms: u64) -> u64 {
    delay_ms + rand::thread_rng().gen_range(0..=delay_ms / 2)
}
