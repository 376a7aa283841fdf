//! Batch orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BatchError {
    #[error("a batch run is already in progress")]
    AlreadyRunning,

    #[error("fetch task for {url} did not finish: {message}")]
    TaskFailed { url: String, message: String },
}

impl UserFacingError for BatchError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyRunning => Some("Wait for the current run to print its summary."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::AlreadyRunning => "batch.already_running",
            Self::TaskFailed { .. } => "batch.task_failed",
        })
    }
}
