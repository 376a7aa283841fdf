//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("request timed out")]
    Timeout { url: String },

    #[error("download failed: {0}")]
    DownloadFailed(String),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("response exceeds the {limit} byte limit")]
    ResponseTooLarge { limit: u64 },

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("failed to initialize HTTP client: {0}")]
    ClientInit(String),
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } => Some("Raise the network timeout in the config file."),
            Self::ConnectionRefused(_) => Some("Check your network connection and DNS settings."),
            Self::ResponseTooLarge { .. } => Some("The page is larger than the response size cap."),
            Self::ClientInit(_) => Some("Check the [network] section of the configuration file."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Timeout { .. } => "network.timeout",
            Self::DownloadFailed(_) => "network.download_failed",
            Self::ConnectionRefused(_) => "network.connection_refused",
            Self::ResponseTooLarge { .. } => "network.response_too_large",
            Self::RequestFailed(_) => "network.request_failed",
            Self::ClientInit(_) => "network.client_init",
        })
    }
}
