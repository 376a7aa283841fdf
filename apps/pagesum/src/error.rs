//! CLI error handling

use std::fmt;

use pagesum_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(pagesum_errors::ConfigError),
    /// Error raised by the fetch engine
    Core(pagesum_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::Core(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Core(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<pagesum_errors::ConfigError> for CliError {
    fn from(e: pagesum_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<pagesum_errors::Error> for CliError {
    fn from(e: pagesum_errors::Error) -> Self {
        match e {
            pagesum_errors::Error::Config(config) => CliError::Config(config),
            other => CliError::Core(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesum_errors::{BatchError, NetworkError};

    #[test]
    fn test_core_error_shows_code_and_hint() {
        let err = CliError::from(pagesum_errors::Error::from(BatchError::AlreadyRunning));
        let rendered = err.to_string();
        assert!(rendered.starts_with("a batch run is already in progress"));
        assert!(rendered.contains("Code: batch.already_running"));
        assert!(rendered.contains("Hint: "));
        assert!(!rendered.contains("Retry"));

        let err = CliError::from(pagesum_errors::Error::from(NetworkError::Timeout {
            url: "http://b".into(),
        }));
        assert!(!err.to_string().contains("Retry"));
    }

    #[test]
    fn test_config_errors_are_unwrapped() {
        let err = CliError::from(pagesum_errors::Error::from(
            pagesum_errors::ConfigError::ParseError {
                message: "bad".into(),
            },
        ));
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
