//! Error types reported across the domain boundary.
//!
//! [`PublishError`] is the failure contract of the [`crate::EventPublisher`]
//! port. It is deliberately transport-neutral: adapters flatten their client
//! library's error into a message so the domain never depends on a broker SDK.
//!
//! [`EnvelopeError`] is produced when a wire message cannot be turned back into
//! a well-formed [`crate::Envelope`].

use thiserror::Error;

use crate::{EventId, EventKind};

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::EventPublisher::publish`].
///
/// A publish error is never retried by the publisher itself. The caller decides
/// whether the enclosing batch fails.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The envelope could not be encoded to JSON.
    #[error("Failed to serialise event {event_id}: {source}")]
    Serialization {
        /// Identifier of the envelope that failed to encode.
        event_id: EventId,
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The broker channel rejected the message or is unusable (e.g. the
    /// connection was lost).
    #[error("Broker did not accept event {event_id}: {message}")]
    Channel {
        /// Identifier of the envelope that was not accepted.
        event_id: EventId,
        /// Transport-specific description of the failure.
        message: String,
    },

    /// The publisher has already been closed.
    #[error("Publisher is closed")]
    Closed,
}

// ---------------------------------------------------------------------------
// Envelope decoding
// ---------------------------------------------------------------------------

/// Errors produced while decoding an [`crate::Envelope`] from its wire form.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// `data` does not have the shape required by `meta.type`.
    #[error("Data does not match event type {kind}: {source}")]
    DataMismatch {
        /// The kind declared in `meta.type`.
        kind: EventKind,
        /// Decoder error for the `data` object.
        #[source]
        source: serde_json::Error,
    },
}
