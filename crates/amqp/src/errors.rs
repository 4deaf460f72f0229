//! Errors raised while establishing or tearing down the broker session.
//!
//! Publish failures are reported through [`eiffel::PublishError`] instead, so
//! callers of the port never see `lapin` types.

use thiserror::Error;

/// Failure to open, prepare or close the AMQP session.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The TCP/AMQP connection could not be opened.
    #[error("Failed to connect to broker: {source}")]
    Connect {
        #[source]
        source: lapin::Error,
    },

    /// The connection opened but a channel could not be created on it.
    #[error("Failed to open channel: {source}")]
    Channel {
        #[source]
        source: lapin::Error,
    },

    /// The broker refused the queue declaration, typically because a queue of
    /// the same name already exists with different properties.
    #[error("Failed to declare queue '{queue}': {source}")]
    DeclareQueue {
        /// Name of the queue being declared.
        queue: String,
        #[source]
        source: lapin::Error,
    },

    /// The session has already been released by `close()`.
    #[error("Broker session is closed")]
    Closed,

    /// Closing the channel or connection failed.
    #[error("Failed to close broker session: {source}")]
    Close {
        #[source]
        source: lapin::Error,
    },
}
