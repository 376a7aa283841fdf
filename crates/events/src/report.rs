use pagesum_types::{FailureKind, FetchOutcome};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::meta::{EventMeta, EventSource};

/// A unit of output directed at the report sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportEvent {
    /// A batch run was admitted and is about to fan out
    Started { url_count: usize },

    /// One URL was fetched successfully
    PerUrl { url: String, byte_length: u64 },

    /// One URL failed
    Error {
        url: String,
        kind: FailureKind,
        message: String,
    },

    /// Aggregate over every outcome of the run
    Summary { total_bytes: u64, elapsed: Duration },

    /// The run is over; the control surface may re-enable itself
    Completion,
}

impl ReportEvent {
    /// Per-URL report for a fetch outcome
    #[must_use]
    pub fn from_outcome(outcome: &FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success { url, byte_length } => Self::PerUrl {
                url: url.clone(),
                byte_length: *byte_length,
            },
            FetchOutcome::Failure { url, kind, message } => Self::Error {
                url: url.clone(),
                kind: *kind,
                message: message.clone(),
            },
        }
    }

    /// Whether this event describes a single URL
    #[must_use]
    pub fn is_per_url(&self) -> bool {
        matches!(self, Self::PerUrl { .. } | Self::Error { .. })
    }

    #[must_use]
    pub fn event_source(&self) -> EventSource {
        if self.is_per_url() {
            EventSource::FETCH
        } else {
            EventSource::BATCH
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Error {
                kind: FailureKind::Unexpected,
                ..
            } => Level::ERROR,
            Self::Error { .. } => Level::WARN,
            Self::PerUrl { .. } => Level::DEBUG,
            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        if self.is_per_url() {
            "pagesum::events::fetch"
        } else {
            "pagesum::events::batch"
        }
    }
}

/// A report event together with its metadata, as it travels through the channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: ReportEvent,
}

impl EventMessage {
    #[must_use]
    pub fn new(meta: EventMeta, event: ReportEvent) -> Self {
        Self { meta, event }
    }

    /// Wrap an event with freshly generated metadata
    #[must_use]
    pub fn from_event(event: ReportEvent) -> Self {
        let meta = EventMeta::new(event.log_level(), event.event_source());
        Self { meta, event }
    }
}
