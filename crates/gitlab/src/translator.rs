//! GitLab → Eiffel translation.
//!
//! [`translate`] is the entry point used by the dispatcher. It classifies the
//! delivery, decodes the typed payload, and returns every envelope in the
//! order it must be published. It never publishes anything itself, so any
//! error it returns leaves the broker untouched.

use eiffel::Envelope;
use serde_json::Value;
use tracing::debug;

use crate::{HookKind, PipelineHook, PushHook, TranslateError};

/// Translates one webhook delivery into Eiffel envelopes.
///
/// `kind` is the raw `X-Gitlab-Event` header value. Classification happens
/// before the body is inspected, so an unsupported kind is reported even when
/// the body is also malformed.
pub fn translate(kind: &str, body: &Value) -> Result<Vec<Envelope>, TranslateError> {
    let envelopes = match HookKind::from_header(kind)? {
        HookKind::Push => translate_push(&PushHook::try_from(body)?),
        HookKind::Pipeline => translate_pipeline(&PipelineHook::try_from(body)?),
    };

    debug!(kind, count = envelopes.len(), "Translated webhook");
    Ok(envelopes)
}

/// One `EiffelSourceChangeCreatedEvent` per commit, in commit order.
pub fn translate_push(push: &PushHook) -> Vec<Envelope> {
    push.commits
        .iter()
        .map(|commit| {
            Envelope::new_source_change_created(
                push.user_name.as_str(),
                push.repo_url.as_str(),
                push.branch.as_str(),
                commit.id.as_str(),
            )
        })
        .collect()
}

/// An `EiffelActivityTriggeredEvent` for the pipeline, followed by an
/// `EiffelActivityFinishedEvent` when the status is `success` or `failed`.
pub fn translate_pipeline(pipeline: &PipelineHook) -> Vec<Envelope> {
    let mut envelopes = vec![Envelope::new_activity_triggered(format!(
        "Pipeline #{}",
        pipeline.id
    ))];

    if let Some(outcome) = pipeline.finished_outcome() {
        envelopes.push(Envelope::new_activity_finished(outcome));
    }

    envelopes
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod tests;
