//! Translation errors.
//!
//! Both variants are client errors: the delivery itself is unusable, and
//! nothing has been published when either is returned.

use thiserror::Error;

/// Errors produced while classifying or decoding a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The `X-Gitlab-Event` discriminator names a hook this bridge does not
    /// translate.
    #[error("Unsupported event: {kind}")]
    UnsupportedEventKind {
        /// The discriminator exactly as received (empty when the header was absent).
        kind: String,
    },

    /// A required field is missing or has the wrong JSON type.
    #[error("Malformed payload: field '{field}' {reason}")]
    MalformedPayload {
        /// Dotted path of the offending field, e.g. `commits[2].id`.
        field: String,
        /// What was wrong with it, e.g. `is missing` or `must be a string`.
        reason: String,
    },
}

impl TranslateError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MalformedPayload {
            field: field.into(),
            reason: "is missing".to_string(),
        }
    }

    pub(crate) fn wrong_type(field: impl Into<String>, expected: &str) -> Self {
        Self::MalformedPayload {
            field: field.into(),
            reason: format!("must be {expected}"),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
