//! The Eiffel event envelope.
//!
//! Every message the bridge emits has the shape
//!
//! ```json
//! { "meta":  { "id": "<uuid>", "type": "<EventKind tag>", "version": "4.0.0", "time": 1700000000000 },
//!   "data":  { ... kind-specific ... },
//!   "links": [] }
//! ```
//!
//! [`Envelope`] can only be built through its kind-specific constructors, so
//! `meta.type` always agrees with the [`EventData`] variant. Envelopes are
//! immutable once constructed.

use serde::{Deserialize, Serialize};

use crate::{EnvelopeError, EventId, EventKind, Timestamp};

/// Category assigned to every activity this bridge reports.
pub const ACTIVITY_CATEGORY_CI: &str = "CI";

// ---------------------------------------------------------------------------
// Kind-specific payloads
// ---------------------------------------------------------------------------

/// `data` of an `EiffelSourceChangeCreatedEvent`: one pushed commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SourceChangeCreatedData {
    /// Name of the user who pushed the change.
    pub author: String,
    /// Clone URL of the repository (HTTP).
    pub repo_url: String,
    /// Branch the commit was pushed to, without the `refs/heads/` prefix.
    pub branch: String,
    /// Commit identifier (SHA).
    pub commit: String,
}

/// `data` of an `EiffelActivityTriggeredEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityTriggeredData {
    /// Human-readable activity name, e.g. `"Pipeline #42"`.
    pub name: String,
    /// Activity category; always [`ACTIVITY_CATEGORY_CI`] for this bridge.
    pub category: String,
}

/// `data` of an `EiffelActivityFinishedEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityFinishedData {
    /// Terminal outcome, passed through verbatim from the caller.
    pub outcome: String,
}

/// Kind-specific envelope payload.
///
/// Serialised without a tag: the discriminator lives in `meta.type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventData {
    SourceChangeCreated(SourceChangeCreatedData),
    ActivityTriggered(ActivityTriggeredData),
    ActivityFinished(ActivityFinishedData),
}

impl EventData {
    /// Returns the event kind this payload belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            EventData::SourceChangeCreated(_) => EventKind::SourceChangeCreated,
            EventData::ActivityTriggered(_) => EventKind::ActivityTriggered,
            EventData::ActivityFinished(_) => EventKind::ActivityFinished,
        }
    }

    fn from_value(kind: EventKind, value: serde_json::Value) -> Result<Self, EnvelopeError> {
        let mismatch = |source| EnvelopeError::DataMismatch { kind, source };
        Ok(match kind {
            EventKind::SourceChangeCreated => {
                EventData::SourceChangeCreated(serde_json::from_value(value).map_err(mismatch)?)
            }
            EventKind::ActivityTriggered => {
                EventData::ActivityTriggered(serde_json::from_value(value).map_err(mismatch)?)
            }
            EventKind::ActivityFinished => {
                EventData::ActivityFinished(serde_json::from_value(value).map_err(mismatch)?)
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The `meta` block of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Unique event identifier.
    pub id: EventId,
    /// Event type tag.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Schema version of `data`.
    pub version: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub time: Timestamp,
}

/// A relation from one event to another.
///
/// The bridge performs no causal linking, so emitted envelopes always carry an
/// empty list; the type exists so received envelopes can be decoded faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link type, e.g. `"CAUSE"`.
    #[serde(rename = "type")]
    pub link_type: String,
    /// The event being linked to.
    pub target: EventId,
}

/// One protocol-conformant Eiffel event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct Envelope {
    meta: Meta,
    data: EventData,
    links: Vec<Link>,
}

impl Envelope {
    /// Creates an `EiffelSourceChangeCreatedEvent` for one pushed commit.
    pub fn new_source_change_created(
        author: impl Into<String>,
        repo_url: impl Into<String>,
        branch: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self::new(EventData::SourceChangeCreated(SourceChangeCreatedData {
            author: author.into(),
            repo_url: repo_url.into(),
            branch: branch.into(),
            commit: commit.into(),
        }))
    }

    /// Creates an `EiffelActivityTriggeredEvent` in the `"CI"` category.
    pub fn new_activity_triggered(name: impl Into<String>) -> Self {
        Self::new(EventData::ActivityTriggered(ActivityTriggeredData {
            name: name.into(),
            category: ACTIVITY_CATEGORY_CI.to_string(),
        }))
    }

    /// Creates an `EiffelActivityFinishedEvent`.
    ///
    /// `outcome` is not validated; callers restrict it to meaningful values.
    pub fn new_activity_finished(outcome: impl Into<String>) -> Self {
        Self::new(EventData::ActivityFinished(ActivityFinishedData {
            outcome: outcome.into(),
        }))
    }

    fn new(data: EventData) -> Self {
        let kind = data.kind();
        Self {
            meta: Meta {
                id: EventId::new_random(),
                kind,
                version: kind.schema_version().to_string(),
                time: Timestamp::now(),
            },
            data,
            links: Vec::new(),
        }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn id(&self) -> EventId {
        self.meta.id
    }

    pub fn kind(&self) -> EventKind {
        self.meta.kind
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Encodes the envelope in its canonical JSON wire form.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Wire shape decoded before `data` is interpreted according to `meta.type`.
#[derive(Deserialize)]
struct RawEnvelope {
    meta: Meta,
    data: serde_json::Value,
    #[serde(default)]
    links: Vec<Link>,
}

impl TryFrom<RawEnvelope> for Envelope {
    type Error = EnvelopeError;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        let data = EventData::from_value(raw.meta.kind, raw.data)?;
        Ok(Self {
            meta: raw.meta,
            data,
            links: raw.links,
        })
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
