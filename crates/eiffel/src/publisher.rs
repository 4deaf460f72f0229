//! The outbound port: handing one envelope to a message broker.
//!
//! Implemented by the `amqp` crate for RabbitMQ. The dispatcher in the
//! `listener` crate holds an `Arc<dyn EventPublisher>` injected at startup, so
//! tests can substitute an in-memory implementation.

use async_trait::async_trait;

use crate::{Envelope, PublishError};

/// Publishes individual Eiffel envelopes.
///
/// ## Contract
///
/// - Each call publishes exactly one envelope or returns an error; there is no
///   internal buffering and no internal retry.
/// - Implementations must be safe to call from many tasks at once. If the
///   underlying transport cannot be used concurrently, the implementation
///   serialises calls itself.
/// - A lost connection surfaces as [`PublishError::Channel`] rather than
///   blocking indefinitely.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes `envelope`, returning once the broker has accepted it for
    /// routing.
    async fn publish(&self, envelope: &Envelope) -> Result<(), PublishError>;
}
