#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Report channel for pagesum
//!
//! Fetch tasks and the batch coordinator run concurrently, but the sink
//! that renders their reports must see one complete event at a time. Every
//! producer holds a cloned [`Reporter`]; each submission is a single owned
//! [`EventMessage`] pushed onto an unbounded mpsc channel, and exactly one
//! consumer loop (see [`drain`]) hands messages to the [`ReportSink`] on its
//! own task. Producers never touch the sink.

pub mod meta;
mod report;
mod sink;

pub use meta::{EventLevel, EventMeta, EventSource};
pub use report::{EventMessage, ReportEvent};
pub use sink::{drain, drain_ready, ReportSink};

use pagesum_types::RunId;
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for the raw event sender
pub type EventSender = UnboundedSender<EventMessage>;

/// Type alias for the raw event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Producer handle shared by every fetch task of a batch run
#[derive(Debug, Clone)]
pub struct Reporter {
    tx: EventSender,
    correlation_id: Option<String>,
}

impl Reporter {
    #[must_use]
    pub fn new(tx: EventSender) -> Self {
        Self {
            tx,
            correlation_id: None,
        }
    }

    /// Create a reporter together with the receiver its consumer loop drains
    #[must_use]
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = channel();
        (Self::new(tx), rx)
    }

    /// Derive a reporter that stamps every message with a batch run id
    #[must_use]
    pub fn for_run(&self, run_id: RunId) -> Self {
        Self {
            tx: self.tx.clone(),
            correlation_id: Some(run_id.to_string()),
        }
    }

    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Submit one event to the sink
    ///
    /// The event is enqueued as a whole; it is silently dropped when the
    /// consumer has gone away.
    pub fn submit(&self, event: ReportEvent) {
        let mut message = EventMessage::from_event(event);
        if let Some(id) = &self.correlation_id {
            message.meta = message.meta.with_correlation_id(id.clone());
        }
        if self.tx.send(message).is_err() {
            tracing::trace!("report consumer dropped; discarding event");
        }
    }

    /// Whether the consumer side of the channel is gone
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
