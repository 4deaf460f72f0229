//! Shared value types for the Eiffel event model.
//!
//! [`EventKind`] is the closed set of event types this bridge emits; each kind
//! carries its wire tag and schema version. [`Timestamp`] is the `meta.time`
//! value, in milliseconds since the Unix epoch.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The Eiffel event types emitted by the bridge.
///
/// Serialises as the Eiffel type tag (`meta.type`), e.g.
/// `"EiffelSourceChangeCreatedEvent"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A change was created in a source repository (one per pushed commit).
    #[serde(rename = "EiffelSourceChangeCreatedEvent")]
    SourceChangeCreated,
    /// An activity (a CI pipeline run) was triggered.
    #[serde(rename = "EiffelActivityTriggeredEvent")]
    ActivityTriggered,
    /// An activity reached a terminal outcome.
    #[serde(rename = "EiffelActivityFinishedEvent")]
    ActivityFinished,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 3] = [
        EventKind::SourceChangeCreated,
        EventKind::ActivityTriggered,
        EventKind::ActivityFinished,
    ];

    /// Returns the Eiffel type tag written to `meta.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::SourceChangeCreated => "EiffelSourceChangeCreatedEvent",
            EventKind::ActivityTriggered => "EiffelActivityTriggeredEvent",
            EventKind::ActivityFinished => "EiffelActivityFinishedEvent",
        }
    }

    /// Returns the schema version written to `meta.version`.
    ///
    /// Fixed per kind; consumers use it to select the matching schema.
    pub fn schema_version(self) -> &'static str {
        match self {
            EventKind::SourceChangeCreated
            | EventKind::ActivityTriggered
            | EventKind::ActivityFinished => "4.0.0",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Highest timestamp handed out so far by [`Timestamp::now`].
static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(i64::MIN);

/// An event creation time, in milliseconds since the Unix epoch (UTC).
///
/// Serialises as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Returns the current wall-clock time.
    ///
    /// Values returned within one process never decrease, even if the system
    /// clock steps backwards: a reading older than the last issued timestamp is
    /// clamped up to it.
    pub fn now() -> Self {
        let now = Utc::now().timestamp_millis();
        let previous = LAST_ISSUED_MILLIS.fetch_max(now, Ordering::SeqCst);
        Self(now.max(previous))
    }

    /// Creates a [`Timestamp`] from a raw millisecond value.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the value in milliseconds since the Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as a [`DateTime<Utc>`], or `None` if it is out of
    /// chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
