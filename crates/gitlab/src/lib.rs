//! EiffelBridge GitLab adapter.
//!
//! Turns one GitLab webhook delivery (the `X-Gitlab-Event` header value plus
//! the decoded JSON body) into the ordered list of Eiffel envelopes it
//! represents.
//!
//! ## Architectural Layer
//!
//! **Anti-corruption layer.** GitLab's payload shapes stop here. Bodies are
//! validated into the typed structures in [`payload`] at the boundary, and only
//! [`eiffel::Envelope`] values leave the crate. Translation has no side
//! effects; publishing is the caller's concern.
//!
//! ## Supported hooks
//!
//! | `X-Gitlab-Event` | Envelopes produced |
//! |------------------|--------------------|
//! | `Push Hook` | one `EiffelSourceChangeCreatedEvent` per commit |
//! | `Pipeline Hook` | one `EiffelActivityTriggeredEvent`, plus one `EiffelActivityFinishedEvent` for `success`/`failed` |
//!
//! Anything else is rejected with [`TranslateError::UnsupportedEventKind`].

pub mod errors;
pub mod payload;
pub mod translator;

pub use errors::TranslateError;
pub use payload::{Commit, HookKind, PipelineHook, PushHook};
pub use translator::{translate, translate_pipeline, translate_push};
