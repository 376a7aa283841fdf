//! Batch run state definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a single batch run
pub type RunId = Uuid;

/// Lifecycle of the batch coordinator
///
/// `Idle` is both the initial state and the state a run returns to once its
/// completion has been reported. There is no `Running -> Running` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BatchState {
    #[default]
    Idle,
    Running,
    Completed,
}

impl BatchState {
    /// Whether a new run may be admitted from this state
    #[must_use]
    pub fn accepts_run(self) -> bool {
        matches!(self, Self::Idle | Self::Completed)
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
        }
    }
}
