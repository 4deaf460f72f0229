//! EiffelBridge AMQP adapter.
//!
//! Implements the [`eiffel::EventPublisher`] port for RabbitMQ using
//! [`lapin`]. One [`AmqpPublisher`] owns one connection, one channel and one
//! declared queue for the lifetime of the process.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection handling, queue declaration and message
//! framing live here. The `listener` crate sees only
//! [`eiffel::EventPublisher`].
//!
//! ## Delivery
//!
//! Messages go through the default exchange with the queue name as routing
//! key, carry `content-type: application/json` and no other properties. The
//! publisher does not enable publisher confirms and never retries; a failed
//! publish is returned to the caller as [`eiffel::PublishError`].

pub mod errors;
pub mod publisher;

pub use errors::ConnectionError;
pub use publisher::{
    connection_properties, message_properties, queue_declare_options, AmqpPublisher,
    DEFAULT_QUEUE_NAME, DEFAULT_RABBIT_URL, JSON_CONTENT_TYPE,
};
