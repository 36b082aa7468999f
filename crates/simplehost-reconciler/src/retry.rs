//! Bounded retry-polling against an eventually-consistent remote API.
//!
//! Create and delete need the same loop with inverted predicates ("active"
//! versus "gone"), so the loop lives here once: [`poll_until`] runs a
//! caller-supplied attempt until it reports done, a fatal error, the
//! wall-clock ceiling, or cancellation.

use std::future::Future;
use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How long and how often a poll loop runs.
///
/// The ceiling is wall-clock time measured from loop entry, not per
/// attempt. The interval is fixed. Attempts may only start strictly before
/// the ceiling: once it is reached the loop reports a timeout instead of
/// issuing another remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum wall-clock duration to keep retrying.
    pub ceiling: Duration,
    /// Delay between poll attempts.
    pub interval: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_CEILING: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    pub fn new(ceiling: Duration, interval: Duration) -> Self {
        Self { ceiling, interval }
    }

    /// Overrides the ceiling.
    #[must_use]
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Overrides the poll interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            ceiling: Self::DEFAULT_CEILING,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// Outcome of a single poll attempt.
#[derive(Debug)]
pub enum PollDecision<T, E> {
    /// The terminal condition was reached.
    Done(T),
    /// The condition is retryable; the string describes it for timeout
    /// context (e.g. the last observed status).
    Retry(String),
    /// The condition is not retryable; the loop stops immediately.
    Fatal(E),
}

/// Why a poll loop stopped without reaching its terminal condition.
#[derive(Debug)]
pub enum PollError<E> {
    /// The ceiling elapsed. `last` is the most recent retry context.
    TimedOut { last: String },
    /// The caller cancelled the loop; no attempt was issued afterwards.
    Cancelled,
    /// An attempt reported a non-retryable error.
    Fatal(E),
}

/// Polls `attempt` until it reports done, within the policy's ceiling.
///
/// Cancellation is observed at every wait boundary and before every
/// attempt, so a cancelled loop never issues another remote call. The
/// distinction between [`PollError::Cancelled`] and [`PollError::TimedOut`]
/// is deliberate: a timeout means the ceiling elapsed, a cancellation means
/// the caller aborted early.
pub async fn poll_until<T, E, F, Fut>(
    policy: RetryPolicy,
    cancel: &CancellationToken,
    mut attempt: F,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PollDecision<T, E>>,
{
    let deadline = Instant::now() + policy.ceiling;
    let mut last = String::from("no attempt completed");
    loop {
        if cancel.is_cancelled() {
            return Err(PollError::Cancelled);
        }
        // The ceiling bounds when attempts may start: waking at the
        // deadline means time is up, not one more remote call.
        let now = Instant::now();
        if now >= deadline {
            return Err(PollError::TimedOut { last });
        }
        match attempt().await {
            PollDecision::Done(value) => return Ok(value),
            PollDecision::Fatal(err) => return Err(PollError::Fatal(err)),
            PollDecision::Retry(condition) => {
                debug!(condition = %condition, "retryable condition, waiting");
                last = condition;
            }
        }
        let wait = policy.interval.min(deadline.saturating_duration_since(Instant::now()));
        tokio::select! {
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            _ = time::sleep(wait) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn policy(ceiling_secs: u64, interval_secs: u64) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_secs(ceiling_secs),
            Duration::from_secs(interval_secs),
        )
    }

    #[test]
    fn default_policy_matches_the_documented_ceiling() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.ceiling, Duration::from_secs(300));
        assert_eq!(policy.interval, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn done_on_first_attempt_does_not_wait() {
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let result: Result<u32, PollError<()>> =
            poll_until(policy(300, 5), &cancel, || async { PollDecision::Done(7) }).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_done() {
        let cancel = CancellationToken::new();
        let attempts = AtomicUsize::new(0);
        let result: Result<(), PollError<()>> = poll_until(policy(300, 5), &cancel, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 3 {
                    PollDecision::Retry("not yet".into())
                } else {
                    PollDecision::Done(())
                }
            }
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_at_the_ceiling_with_last_context() {
        let cancel = CancellationToken::new();
        let started = Instant::now();
        let result: Result<(), PollError<()>> = poll_until(policy(30, 10), &cancel, || async {
            PollDecision::Retry("status provisioning".into())
        })
        .await;
        match result {
            Err(PollError::TimedOut { last }) => assert_eq!(last, "status provisioning"),
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn no_attempt_starts_at_or_after_the_ceiling() {
        let cancel = CancellationToken::new();
        let attempts = AtomicUsize::new(0);
        // Interval 10s against a 30s ceiling: attempts at t=0, 10 and 20;
        // waking at t=30 is a timeout, not a fourth attempt.
        let result: Result<(), PollError<()>> = poll_until(policy(30, 10), &cancel, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { PollDecision::Retry("not yet".into()) }
        })
        .await;
        assert!(matches!(result, Err(PollError::TimedOut { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_stops_immediately() {
        let cancel = CancellationToken::new();
        let attempts = AtomicUsize::new(0);
        let result: Result<(), PollError<&str>> = poll_until(policy(300, 5), &cancel, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { PollDecision::Fatal("lookup failed") }
        })
        .await;
        assert!(matches!(result, Err(PollError::Fatal("lookup failed"))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pre_cancelled_token_issues_no_attempts() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let attempts = AtomicUsize::new(0);
        let result: Result<(), PollError<()>> = poll_until(policy(300, 5), &cancel, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { PollDecision::Retry("never".into()) }
        })
        .await;
        assert!(matches!(result, Err(PollError::Cancelled)));
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_mid_wait_beats_the_ceiling() {
        let cancel = CancellationToken::new();
        let attempts = AtomicUsize::new(0);
        let loop_fut = poll_until(policy(60, 10), &cancel, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { PollDecision::<(), ()>::Retry("still waiting".into()) }
        });
        let canceller = async {
            time::sleep(Duration::from_secs(12)).await;
            cancel.cancel();
        };
        let (result, ()) = tokio::join!(loop_fut, canceller);
        assert!(matches!(result, Err(PollError::Cancelled)));
        // Attempts at t=0 and t=10 only; nothing after the cancel at t=12.
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
