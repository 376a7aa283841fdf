#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Batch coordinator for pagesum
//!
//! Fans out one fetch task per URL, waits for every outcome, reduces them
//! into a [`BatchResult`], and drives the reporter through the run.

mod guard;

use futures::future::join_all;
use guard::RunGuard;
use pagesum_errors::{BatchError, Error};
use pagesum_events::{ReportEvent, Reporter};
use pagesum_net::{process_url, PageFetcher};
use pagesum_types::{BatchResult, BatchState, FetchOutcome, RunId};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

/// Runs batches of fetches, one at a time
pub struct BatchCoordinator {
    fetcher: Arc<dyn PageFetcher>,
    reporter: Reporter,
    state: Arc<watch::Sender<BatchState>>,
}

impl BatchCoordinator {
    /// Create a coordinator around a shared fetcher and a reporter
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>, reporter: Reporter) -> Self {
        let (state, _) = watch::channel(BatchState::Idle);
        Self {
            fetcher,
            reporter,
            state: Arc::new(state),
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> BatchState {
        *self.state.borrow()
    }

    /// Watch lifecycle transitions (e.g. to enable or disable a trigger)
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BatchState> {
        self.state.subscribe()
    }

    /// Fetch every URL concurrently and report the aggregate
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::AlreadyRunning`] if another run is in progress.
    /// Per-URL failures never surface here; they become failure outcomes.
    pub async fn run_batch(&self, urls: &[String]) -> Result<BatchResult, Error> {
        let guard = self.admit()?;
        Ok(self.execute(urls, guard).await)
    }

    /// Fire-and-forget trigger for a control surface
    ///
    /// Admission happens on the caller's context, so a rejected trigger is
    /// reported synchronously; the run itself executes on the runtime.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::AlreadyRunning`] if another run is in progress.
    pub fn start_batch(
        self: &Arc<Self>,
        urls: Vec<String>,
    ) -> Result<JoinHandle<BatchResult>, Error> {
        let guard = self.admit()?;
        let coordinator = Arc::clone(self);
        Ok(tokio::spawn(async move {
            coordinator.execute(&urls, guard).await
        }))
    }

    fn admit(&self) -> Result<RunGuard, Error> {
        RunGuard::acquire(&self.state).ok_or_else(|| {
            warn!("rejected batch trigger: a run is already in progress");
            BatchError::AlreadyRunning.into()
        })
    }

    async fn execute(&self, urls: &[String], guard: RunGuard) -> BatchResult {
        let run_id: RunId = Uuid::new_v4();
        let reporter = self.reporter.for_run(run_id);
        let start = Instant::now();

        info!(%run_id, url_count = urls.len(), "batch run started");
        reporter.submit(ReportEvent::Started {
            url_count: urls.len(),
        });

        let tasks: Vec<_> = urls
            .iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let reporter = reporter.clone();
                let url = url.clone();
                tokio::spawn(async move { process_url(fetcher.as_ref(), &url, &reporter).await })
            })
            .collect();

        // All-complete barrier: every task resolves to exactly one outcome
        let joined = join_all(tasks).await;
        let outcomes: Vec<FetchOutcome> = joined
            .into_iter()
            .zip(urls)
            .map(|(joined, url)| match joined {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    warn!(%run_id, url = %url, error = %join_error, "fetch task aborted");
                    let error: Error = if join_error.is_cancelled() {
                        Error::Cancelled
                    } else {
                        BatchError::TaskFailed {
                            url: url.clone(),
                            message: join_error.to_string(),
                        }
                        .into()
                    };
                    let outcome = FetchOutcome::from_error(url.as_str(), &error);
                    reporter.submit(ReportEvent::from_outcome(&outcome));
                    outcome
                }
            })
            .collect();

        let result = BatchResult::from_outcomes(outcomes, start.elapsed());
        info!(
            %run_id,
            total_bytes = result.total_bytes,
            succeeded = result.succeeded(),
            failed = result.failed(),
            elapsed_ms = u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
            "batch run finished"
        );

        reporter.submit(ReportEvent::Summary {
            total_bytes: result.total_bytes,
            elapsed: result.elapsed,
        });
        guard.finish();
        reporter.submit(ReportEvent::Completion);

        result
    }
}
