//! Fetch outcomes and batch aggregates

use pagesum_errors::{Error, UserFacingError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Classification of a per-URL failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport-layer failure: DNS, connect, TLS, timeout, oversized response
    Network,
    /// Anything else surfaced while processing one URL
    Unexpected,
}

impl FailureKind {
    /// Classify an error raised while fetching a single URL
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        if error.is_network() {
            Self::Network
        } else {
            Self::Unexpected
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// Result of fetching one URL once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    Success {
        url: String,
        byte_length: u64,
    },
    Failure {
        url: String,
        kind: FailureKind,
        message: String,
    },
}

impl FetchOutcome {
    /// Build a failure outcome from the error that caused it
    #[must_use]
    pub fn from_error(url: impl Into<String>, error: &Error) -> Self {
        Self::Failure {
            url: url.into(),
            kind: FailureKind::from_error(error),
            message: error.user_message().into_owned(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    /// Bytes this outcome contributes to the batch total
    #[must_use]
    pub fn contributed_bytes(&self) -> u64 {
        match self {
            Self::Success { byte_length, .. } => *byte_length,
            Self::Failure { .. } => 0,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Aggregate over every outcome of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Sum of `byte_length` over successful outcomes
    pub total_bytes: u64,
    /// Wall-clock time from batch start to the last outcome
    pub elapsed: Duration,
    /// Outcomes in input order
    pub outcomes: Vec<FetchOutcome>,
}

impl BatchResult {
    /// Reduce a complete set of outcomes into a batch result
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<FetchOutcome>, elapsed: Duration) -> Self {
        let total_bytes = outcomes
            .iter()
            .map(FetchOutcome::contributed_bytes)
            .fold(0u64, u64::saturating_add);
        Self {
            total_bytes,
            elapsed,
            outcomes,
        }
    }

    #[must_use]
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcome_count() - self.succeeded()
    }
}
