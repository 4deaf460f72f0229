//! EiffelBridge event source.
//!
//! Receives GitLab webhook deliveries over HTTP and drives each one through
//! translation and publishing:
//!
//! - [`Dispatcher`] — the per-request control flow. Decodes the body, asks the
//!   `gitlab` crate for the envelopes, and hands them one at a time to the
//!   injected [`eiffel::EventPublisher`]. Stops at the first publish failure.
//! - [`router`] — the axum [`axum::Router`] exposing `POST /webhook` and
//!   `GET /healthz`, mapping each [`Outcome`] to an HTTP status.
//! - [`serve`] — binds the router to a socket and runs it until shutdown.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP framing, header handling and status mapping live
//! here. The only shared state between requests is the publisher held by the
//! dispatcher.
//!
//! ## Status mapping
//!
//! | Outcome | Status |
//! |---------|--------|
//! | [`Outcome::AllPublished`] | 200 OK |
//! | [`Outcome::BadPayload`] | 400 Bad Request |
//! | [`Outcome::UnsupportedKind`] | 501 Not Implemented |
//! | [`Outcome::PublishFailedAt`] | 500 Internal Server Error |
//! | token mismatch | 401 Unauthorized |

pub mod dispatcher;
pub mod errors;
pub mod routes;

#[cfg(test)]
mod test_support;

pub use dispatcher::{Dispatcher, Outcome};
pub use errors::ListenerError;
pub use routes::{
    router, serve, status_for, WebhookResponse, WebhookState, GITLAB_EVENT_HEADER,
    GITLAB_TOKEN_HEADER,
};
