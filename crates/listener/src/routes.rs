//! HTTP surface: `POST /webhook` and `GET /healthz`.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{Dispatcher, ListenerError, Outcome};

/// Header carrying the webhook kind, e.g. `Push Hook`.
pub const GITLAB_EVENT_HEADER: &str = "X-Gitlab-Event";

/// Header carrying the secret token configured on the GitLab webhook.
pub const GITLAB_TOKEN_HEADER: &str = "X-Gitlab-Token";

// ---------------------------------------------------------------------------
// State and responses
// ---------------------------------------------------------------------------

/// Shared state for the webhook routes.
#[derive(Debug, Clone)]
pub struct WebhookState {
    dispatcher: Dispatcher,
    webhook_token: Option<String>,
}

impl WebhookState {
    /// Creates the route state.
    ///
    /// When `webhook_token` is `Some`, every delivery must carry the same
    /// value in [`GITLAB_TOKEN_HEADER`] or it is rejected with 401 before the
    /// body is read.
    pub fn new(dispatcher: Dispatcher, webhook_token: Option<String>) -> Self {
        Self {
            dispatcher,
            webhook_token,
        }
    }
}

/// JSON body returned by `POST /webhook`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Number of events published for this delivery.
    pub published: usize,
    /// Failure description; absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Outcome> for WebhookResponse {
    fn from(outcome: &Outcome) -> Self {
        Self {
            published: outcome.published(),
            error: (!outcome.is_success()).then(|| outcome.to_string()),
        }
    }
}

/// HTTP status reported for a dispatch outcome.
pub fn status_for(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::AllPublished { .. } => StatusCode::OK,
        Outcome::BadPayload { .. } => StatusCode::BAD_REQUEST,
        Outcome::UnsupportedKind { .. } => StatusCode::NOT_IMPLEMENTED,
        Outcome::PublishFailedAt { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Builds the webhook router.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/healthz", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves `router` until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, router: Router, shutdown: F) -> Result<(), ListenerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;
    info!(address = %addr, "Listening for webhooks");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ListenerError::Serve)
}

async fn receive_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<WebhookResponse>) {
    if let Some(expected) = state.webhook_token.as_deref() {
        let provided = header_str(&headers, GITLAB_TOKEN_HEADER);
        if !tokens_match(expected, provided) {
            warn!("Rejected webhook with missing or invalid token");
            return (
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse {
                    published: 0,
                    error: Some("invalid webhook token".to_string()),
                }),
            );
        }
    }

    let kind = header_str(&headers, GITLAB_EVENT_HEADER);
    let outcome = state.dispatcher.dispatch(kind, &body).await;

    (status_for(&outcome), Json(WebhookResponse::from(&outcome)))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Header value as text; absent or non-UTF-8 values read as empty.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Compares tokens without short-circuiting on the first differing byte.
fn tokens_match(expected: &str, provided: &str) -> bool {
    let (expected, provided) = (expected.as_bytes(), provided.as_bytes());
    if expected.len() != provided.len() {
        return false;
    }
    expected
        .iter()
        .zip(provided)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
