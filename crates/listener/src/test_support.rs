//! In-memory [`EventPublisher`] used by the listener tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use eiffel::{Envelope, EventPublisher, PublishError};

/// Records every published envelope; optionally fails on the n-th call.
#[derive(Default)]
pub(crate) struct RecordingPublisher {
    published: Mutex<Vec<Envelope>>,
    attempts: AtomicUsize,
    fail_on_attempt: Option<usize>,
}

impl RecordingPublisher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fails the `attempt`-th call (1-based) with a channel error.
    pub(crate) fn failing_on(attempt: usize) -> Self {
        Self {
            fail_on_attempt: Some(attempt),
            ..Self::default()
        }
    }

    pub(crate) fn published(&self) -> Vec<Envelope> {
        self.published.lock().unwrap().clone()
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, envelope: &Envelope) -> Result<(), PublishError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_attempt == Some(attempt) {
            return Err(PublishError::Channel {
                event_id: envelope.id(),
                message: "connection reset by peer".to_string(),
            });
        }
        self.published.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}
