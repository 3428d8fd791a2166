//! Timeout-bounded polling for a task's terminal state.

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use gridtrack_core::{CoreError, TaskId};

use crate::config::WaitConfig;
use crate::source::StatusSource;

/// Polls a [`StatusSource`] until a task's overall status turns terminal or
/// the configured timeout elapses.
///
/// The wait occupies the calling task for its whole duration; the only
/// suspension point is the sleep between polls, which also listens for
/// cancellation.
pub struct Waiter {
    config: WaitConfig,
}

impl Waiter {
    /// Create a new Waiter.
    pub fn new(config: WaitConfig) -> Self {
        Self { config }
    }

    /// Wait until `task_id` reaches a terminal overall status.
    ///
    /// Returns `Ok(true)` once a terminal status is observed and
    /// `Ok(false)` when the timeout elapses first. This answers "did the
    /// task settle", not "did it succeed": an all-failed task also returns
    /// `true`, and the caller inspects the overall status to tell the two
    /// apart. Source failures propagate immediately.
    ///
    /// A terminal transition is observed within one polling period of when
    /// it becomes permanently true; detection is never instantaneous.
    pub async fn wait(
        &self,
        source: &dyn StatusSource,
        task_id: &TaskId,
    ) -> Result<bool, CoreError> {
        self.wait_with_cancel(source, task_id, &CancellationToken::new())
            .await
    }

    /// Like [`wait`](Self::wait), but also stops early when `cancel` fires,
    /// returning `Ok(false)` as if the deadline had passed.
    pub async fn wait_with_cancel(
        &self,
        source: &dyn StatusSource,
        task_id: &TaskId,
        cancel: &CancellationToken,
    ) -> Result<bool, CoreError> {
        let interval = self.config.effective_interval();
        let start = Instant::now();

        loop {
            let overall = source.overall_status(task_id).await?;
            debug!(task_id = %task_id, overall = ?overall, "Polled overall status");

            if overall.is_terminal() {
                return Ok(true);
            }

            if let Some(timeout) = self.config.timeout {
                if start.elapsed() >= timeout {
                    warn!(
                        task_id = %task_id,
                        timeout_ms = timeout.as_millis() as u64,
                        "Wait timed out before task settled"
                    );
                    return Ok(false);
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(task_id = %task_id, "Wait cancelled");
                    return Ok(false);
                }
                _ = sleep(interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use gridtrack_core::{OverallStatus, Status};

    /// Reports non-terminal until `terminal_after` polls have happened.
    struct FlipSource {
        before: OverallStatus,
        terminal_after: usize,
        calls: AtomicUsize,
    }

    impl FlipSource {
        fn new(before: OverallStatus, terminal_after: usize) -> Self {
            Self {
                before,
                terminal_after,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusSource for FlipSource {
        async fn overall_status(&self, _task_id: &TaskId) -> Result<OverallStatus, CoreError> {
            let seen = self.calls.fetch_add(1, Ordering::SeqCst);
            if seen >= self.terminal_after {
                Ok(OverallStatus::Aggregated(Status::Completed))
            } else {
                Ok(self.before)
            }
        }
    }

    struct FailingSource;

    #[async_trait]
    impl StatusSource for FailingSource {
        async fn overall_status(&self, task_id: &TaskId) -> Result<OverallStatus, CoreError> {
            Err(CoreError::TaskNotFound(task_id.to_string()))
        }
    }

    fn never_terminal() -> FlipSource {
        FlipSource::new(OverallStatus::Aggregated(Status::Waiting), usize::MAX)
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_true_when_already_terminal() {
        let source = FlipSource::new(OverallStatus::Aggregated(Status::Waiting), 0);
        let waiter = Waiter::new(WaitConfig::default());

        let settled = waiter.wait(&source, &TaskId::new("t")).await.unwrap();

        assert!(settled);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_terminal_also_settles() {
        struct ErrorSource;

        #[async_trait]
        impl StatusSource for ErrorSource {
            async fn overall_status(&self, _: &TaskId) -> Result<OverallStatus, CoreError> {
                Ok(OverallStatus::Aggregated(Status::Error))
            }
        }

        let waiter = Waiter::new(WaitConfig::default());
        let settled = waiter.wait(&ErrorSource, &TaskId::new("t")).await.unwrap();
        assert!(settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_after_deadline() {
        let source = never_terminal();
        let waiter = Waiter::new(WaitConfig {
            timeout: Some(Duration::from_secs(5)),
            check_interval: Duration::from_secs(1),
        });

        let start = Instant::now();
        let settled = waiter.wait(&source, &TaskId::new("t")).await.unwrap();
        let elapsed = start.elapsed();

        assert!(!settled);
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_larger_than_timeout_finishes_at_timeout() {
        // timeout 5, interval 10: the interval is clamped so the wait ends
        // in about 5 time units, not 10.
        let source = never_terminal();
        let waiter = Waiter::new(WaitConfig {
            timeout: Some(Duration::from_secs(5)),
            check_interval: Duration::from_secs(10),
        });

        let start = Instant::now();
        let settled = waiter.wait(&source, &TaskId::new("t")).await.unwrap();
        let elapsed = start.elapsed();

        assert!(!settled);
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_observes_terminal_within_one_interval() {
        let source = FlipSource::new(OverallStatus::Aggregated(Status::Running), 3);
        let waiter = Waiter::new(WaitConfig {
            timeout: Some(Duration::from_secs(60)),
            check_interval: Duration::from_secs(1),
        });

        let start = Instant::now();
        let settled = waiter.wait(&source, &TaskId::new("t")).await.unwrap();

        assert!(settled);
        assert_eq!(source.calls(), 4);
        assert!(start.elapsed() <= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_children_keeps_polling() {
        let source = FlipSource::new(OverallStatus::NoChildren, 2);
        let waiter = Waiter::new(WaitConfig {
            timeout: Some(Duration::from_secs(60)),
            check_interval: Duration::from_secs(1),
        });

        let settled = waiter.wait(&source, &TaskId::new("t")).await.unwrap();

        assert!(settled);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_wait_outlives_default_deadline() {
        let source = FlipSource::new(OverallStatus::Aggregated(Status::Running), 12);
        let waiter = Waiter::new(WaitConfig {
            timeout: None,
            check_interval: Duration::from_secs(10),
        });

        // 12 polls at 10s apart is well past the default 60s deadline.
        let settled = waiter.wait(&source, &TaskId::new("t")).await.unwrap();
        assert!(settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_wait() {
        let source = never_terminal();
        let waiter = Waiter::new(WaitConfig {
            timeout: None,
            check_interval: Duration::from_secs(10),
        });

        let cancel = CancellationToken::new();
        cancel.cancel();

        let settled = waiter
            .wait_with_cancel(&source, &TaskId::new("t"), &cancel)
            .await
            .unwrap();

        assert!(!settled);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_error_propagates() {
        let waiter = Waiter::new(WaitConfig::default());
        let err = waiter
            .wait(&FailingSource, &TaskId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(_)));
    }
}
