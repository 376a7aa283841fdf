//! Structured logging integration for report events
//!
//! Every message the CLI delivers to its sink is mirrored into tracing with
//! structured fields, so a `--debug` log file carries the full run history.

use pagesum_events::{EventMessage, ReportEvent};
use pagesum_types::FailureKind;
use tracing::{debug, error, info, warn};

/// Log a report message using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    match &message.event {
        ReportEvent::Started { url_count } => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                url_count = url_count,
                "Batch started"
            );
        }
        ReportEvent::PerUrl { url, byte_length } => {
            debug!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                url = %url,
                byte_length = byte_length,
                "Page fetched"
            );
        }
        ReportEvent::Error {
            url,
            kind: FailureKind::Network,
            message,
        } => {
            warn!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                url = %url,
                error = %message,
                "Page fetch failed"
            );
        }
        ReportEvent::Error {
            url,
            kind: FailureKind::Unexpected,
            message,
        } => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                url = %url,
                error = %message,
                "Page fetch failed unexpectedly"
            );
        }
        ReportEvent::Summary {
            total_bytes,
            elapsed,
        } => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                total_bytes = total_bytes,
                elapsed = ?elapsed,
                "Batch summary"
            );
        }
        ReportEvent::Completion => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                "Batch completed"
            );
        }
    }
}
