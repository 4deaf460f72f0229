//! Per-request translate-and-publish control flow.
//!
//! A delivery moves through `Received → Classified → Translating →
//! Publishing(1..=N) → Completed | Failed(i)`. Translation finishes before the
//! first publish, so a translation error never has side effects. Publishing is
//! strictly sequential; when envelope `i` fails, envelopes `i+1..=N` are never
//! attempted and envelopes `1..i` stay published.

use std::sync::Arc;

use eiffel::{EventPublisher, PublishError};
use gitlab::TranslateError;
use serde_json::Value;
use tracing::{debug, error, info, warn};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of dispatching one webhook delivery.
#[derive(Debug)]
pub enum Outcome {
    /// Every envelope was accepted by the publisher (possibly zero of them).
    AllPublished {
        /// Number of envelopes published.
        count: usize,
    },

    /// The `X-Gitlab-Event` discriminator is not one the bridge translates.
    /// Nothing was published.
    UnsupportedKind { kind: String },

    /// The body is not JSON, or a required field is missing or mistyped.
    /// Nothing was published.
    BadPayload {
        /// Dotted path of the offending field (`body` for undecodable JSON).
        field: String,
        reason: String,
    },

    /// Publishing envelope `index` (1-based) failed. Envelopes before it were
    /// published; envelopes after it were not attempted.
    PublishFailedAt { index: usize, error: PublishError },
}

impl Outcome {
    /// Returns `true` for [`Outcome::AllPublished`].
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::AllPublished { .. })
    }

    /// Number of envelopes that reached the publisher successfully.
    pub fn published(&self) -> usize {
        match self {
            Outcome::AllPublished { count } => *count,
            Outcome::PublishFailedAt { index, .. } => index.saturating_sub(1),
            Outcome::UnsupportedKind { .. } | Outcome::BadPayload { .. } => 0,
        }
    }
}

impl From<TranslateError> for Outcome {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::UnsupportedEventKind { kind } => Outcome::UnsupportedKind { kind },
            TranslateError::MalformedPayload { field, reason } => {
                Outcome::BadPayload { field, reason }
            }
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::AllPublished { count } => write!(f, "published {count} event(s)"),
            Outcome::UnsupportedKind { kind } => write!(f, "unsupported event: {kind}"),
            Outcome::BadPayload { field, reason } => {
                write!(f, "malformed payload: field '{field}' {reason}")
            }
            Outcome::PublishFailedAt { index, error } => {
                write!(f, "publishing event {index} failed: {error}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Drives one webhook delivery through translation and publishing.
///
/// Cheap to share: the only state is the injected publisher. Translation is
/// pure and runs concurrently across requests; any serialisation of publishes
/// is the publisher's responsibility.
#[derive(Clone)]
pub struct Dispatcher {
    publisher: Arc<dyn EventPublisher>,
}

impl Dispatcher {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Dispatches a delivery whose body has not been decoded yet.
    ///
    /// An undecodable body is reported as [`Outcome::BadPayload`] with field
    /// `body`, before the kind is classified.
    pub async fn dispatch(&self, kind: &str, raw_body: &[u8]) -> Outcome {
        match serde_json::from_slice::<Value>(raw_body) {
            Ok(body) => self.dispatch_value(kind, &body).await,
            Err(err) => {
                warn!(kind, error = %err, "Rejected webhook with undecodable body");
                Outcome::BadPayload {
                    field: "body".to_string(),
                    reason: format!("is not valid JSON ({err})"),
                }
            }
        }
    }

    /// Dispatches a delivery whose body is already decoded.
    #[tracing::instrument(name = "dispatch", skip_all, fields(kind = %kind))]
    pub async fn dispatch_value(&self, kind: &str, body: &Value) -> Outcome {
        info!("Received GitLab event");

        let envelopes = match gitlab::translate(kind, body) {
            Ok(envelopes) => envelopes,
            Err(err) => {
                warn!(error = %err, "Rejected webhook");
                return err.into();
            }
        };

        let total = envelopes.len();
        for (position, envelope) in envelopes.iter().enumerate() {
            let index = position + 1;
            if let Err(err) = self.publisher.publish(envelope).await {
                error!(
                    index,
                    total,
                    event_id = %envelope.id(),
                    error = %err,
                    "Publish failed; abandoning remaining events"
                );
                return Outcome::PublishFailedAt { index, error: err };
            }
            debug!(index, total, event_id = %envelope.id(), kind = %envelope.kind(), "Published event");
        }

        info!(count = total, "Published all events");
        Outcome::AllPublished { count: total }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
