//! Single-URL fetch with failure isolation

use async_trait::async_trait;
use pagesum_errors::Error;
use pagesum_events::{ReportEvent, Reporter};
use pagesum_types::FetchOutcome;
use tracing::debug;

/// Anything that can measure the body of a page
///
/// Implementations are shared by every concurrent fetch task of a batch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` once and return the body length in bytes
    async fn fetch_len(&self, url: &str) -> Result<u64, Error>;
}

/// Fetch one URL, report the result, and return it as an outcome
///
/// This is the only place fetch errors are caught: whatever goes wrong is
/// classified into a [`FetchOutcome::Failure`] and reported immediately, so
/// nothing escapes to the batch coordinator.
pub async fn process_url<F>(fetcher: &F, url: &str, reporter: &Reporter) -> FetchOutcome
where
    F: PageFetcher + ?Sized,
{
    let outcome = match fetcher.fetch_len(url).await {
        Ok(byte_length) => {
            debug!(url, byte_length, "page fetched");
            FetchOutcome::Success {
                url: url.to_string(),
                byte_length,
            }
        }
        Err(error) => {
            debug!(url, %error, "page fetch failed");
            FetchOutcome::from_error(url, &error)
        }
    };

    reporter.submit(ReportEvent::from_outcome(&outcome));
    outcome
}
