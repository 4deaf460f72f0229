//! Core domain for EiffelBridge.
//!
//! This crate defines the Eiffel event envelope emitted by the bridge, the
//! closed set of event kinds, and the [`EventPublisher`] port through which
//! envelopes leave the process. Infrastructure crates implement the port; they
//! never construct envelopes by hand.
//!
//! ## Architectural Layer
//!
//! **Domain model + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is emitted; infrastructure crates define *where* it goes.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`EventId`) |
//! | [`types`] | Shared value types (`Timestamp`, `EventKind`) |
//! | [`events`] | The [`Envelope`] wire type and its constructors |
//! | [`publisher`] | The [`EventPublisher`] port |
//! | [`errors`] | Errors reported across the port |

pub mod errors;
pub mod events;
pub mod identifiers;
pub mod publisher;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{EnvelopeError, PublishError};
pub use events::{
    ActivityFinishedData, ActivityTriggeredData, Envelope, EventData, Link, Meta,
    SourceChangeCreatedData, ACTIVITY_CATEGORY_CI,
};
pub use identifiers::EventId;
pub use publisher::EventPublisher;
pub use types::{EventKind, Timestamp};
