//! Shared HTTP client with a client-wide response size cap

use async_trait::async_trait;
use futures::StreamExt;
use pagesum_config::{NetworkConfig, MAX_RESPONSE_BYTES};
use pagesum_errors::{Error, NetworkError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::PageFetcher;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Largest response body accepted, in bytes
    pub max_response_bytes: u64,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(100),
            connect_timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 32,
            user_agent: format!("pagesum/{}", env!("CARGO_PKG_VERSION")),
            max_response_bytes: MAX_RESPONSE_BYTES,
        }
    }
}

impl From<&NetworkConfig> for NetConfig {
    fn from(config: &NetworkConfig) -> Self {
        let defaults = Self::default();
        Self {
            timeout: Duration::from_secs(config.timeout),
            connect_timeout: Duration::from_secs(config.connect_timeout),
            pool_idle_timeout: Duration::from_secs(config.pool_idle_timeout),
            pool_max_idle_per_host: config.pool_max_idle_per_host,
            user_agent: config.user_agent.clone().unwrap_or(defaults.user_agent),
            max_response_bytes: defaults.max_response_bytes,
        }
    }
}

/// HTTP client shared read-only by every fetch task
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ClientInit(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// GET `url` and count the bytes of its body
    ///
    /// The status code is not inspected: an error page that arrives intact
    /// counts like any other body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for malformed URLs and a
    /// [`NetworkError`] for transport failures, timeouts, and bodies larger
    /// than `max_response_bytes`.
    pub async fn fetch_body_len(&self, url: &str) -> Result<u64, Error> {
        let parsed = parse_url(url)?;
        let limit = self.config.max_response_bytes;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| Self::convert_error(url, &e))?;

        if response.content_length().is_some_and(|declared| declared > limit) {
            return Err(NetworkError::ResponseTooLarge { limit }.into());
        }

        let mut stream = response.bytes_stream();
        let mut received = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Self::convert_error(url, &e))?;
            received += chunk.len() as u64;
            if received > limit {
                return Err(NetworkError::ResponseTooLarge { limit }.into());
            }
        }

        Ok(received)
    }

    /// Map a reqwest failure onto the error taxonomy
    fn convert_error(url: &str, error: &reqwest::Error) -> Error {
        if error.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
            .into()
        } else if error.is_connect() {
            NetworkError::ConnectionRefused(error_chain(error)).into()
        } else if error.is_builder() {
            Error::invalid_url(url, error.to_string())
        } else if error.is_body() || error.is_decode() {
            NetworkError::DownloadFailed(error_chain(error)).into()
        } else {
            NetworkError::RequestFailed(error_chain(error)).into()
        }
    }
}

#[async_trait]
impl PageFetcher for NetClient {
    async fn fetch_len(&self, url: &str) -> Result<u64, Error> {
        self.fetch_body_len(url).await
    }
}

/// Parse and validate a fetch target
///
/// # Errors
///
/// Returns an error if the URL is malformed or does not use http(s).
pub fn parse_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url).map_err(|e| Error::invalid_url(url, e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::invalid_url(url, format!("unsupported scheme `{other}`"))),
    }
}

/// Render an error with its sources, reqwest hides the useful part there
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://example.com").is_ok());
        assert!(parse_url("http://127.0.0.1:8080/page").is_ok());
        assert!(matches!(
            parse_url("not a url"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_url("ftp://example.com/file"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_config_from_network_section() {
        let section = NetworkConfig {
            timeout: 7,
            user_agent: Some("custom/1.0".into()),
            ..NetworkConfig::default()
        };
        let config = NetConfig::from(&section);
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.user_agent, "custom/1.0");
        assert_eq!(config.max_response_bytes, MAX_RESPONSE_BYTES);
    }
}
