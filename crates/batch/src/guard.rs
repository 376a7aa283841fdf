//! Admission guard for batch runs

use pagesum_types::BatchState;
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the coordinator in `Running` for the lifetime of one run
///
/// A run that finishes normally walks `Running -> Completed -> Idle` through
/// [`RunGuard::finish`]. A run whose future is dropped early falls back to
/// `Idle` on drop so the coordinator never stays wedged in `Running`.
pub(crate) struct RunGuard {
    state: Arc<watch::Sender<BatchState>>,
    finished: bool,
}

impl RunGuard {
    /// Move `Idle`/`Completed` to `Running`, or return `None` if a run is active
    pub(crate) fn acquire(state: &Arc<watch::Sender<BatchState>>) -> Option<Self> {
        let admitted = state.send_if_modified(|current| {
            if current.accepts_run() {
                *current = BatchState::Running;
                true
            } else {
                false
            }
        });

        admitted.then(|| Self {
            state: Arc::clone(state),
            finished: false,
        })
    }

    /// Record completion and return to `Idle`
    pub(crate) fn finish(mut self) {
        self.state.send_replace(BatchState::Completed);
        self.state.send_replace(BatchState::Idle);
        self.finished = true;
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.state.send_replace(BatchState::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let (tx, rx) = watch::channel(BatchState::Idle);
        let state = Arc::new(tx);

        let guard = RunGuard::acquire(&state).unwrap();
        assert_eq!(*rx.borrow(), BatchState::Running);
        assert!(RunGuard::acquire(&state).is_none());

        guard.finish();
        assert_eq!(*rx.borrow(), BatchState::Idle);
        assert!(RunGuard::acquire(&state).is_some());
    }

    #[test]
    fn test_abandoned_run_returns_to_idle() {
        let (tx, rx) = watch::channel(BatchState::Idle);
        let state = Arc::new(tx);

        drop(RunGuard::acquire(&state).unwrap());
        assert_eq!(*rx.borrow(), BatchState::Idle);
    }
}
