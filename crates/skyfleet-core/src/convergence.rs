//! Convergence poller
//!
//! Every create call against the control plane is asynchronous and returns
//! immediately with a transitional state. This module is the single place
//! that encodes "wait for convergence": a bounded retry loop re-querying a
//! resource until a target predicate holds or the budget runs out. The
//! timeout/backoff policy lives here, not at the call sites.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Bound on a convergence wait, expressed either as a fetch-attempt
/// counter or as an elapsed wall-clock deadline.
#[derive(Debug, Clone, Copy)]
pub enum PollBudget {
    Attempts(u32),
    Deadline(Duration),
}

/// Budget exhausted before the predicate held.
#[derive(Debug, Error)]
#[error("convergence not reached after {attempts} fetches over {elapsed:?}")]
pub struct WaitTimeout {
    pub elapsed: Duration,
    pub attempts: u32,
}

/// Poller outcome distinguishing budget exhaustion from a failing fetch.
#[derive(Debug, Error)]
pub enum WaitError<E: std::error::Error> {
    #[error(transparent)]
    Timeout(WaitTimeout),

    #[error(transparent)]
    Fetch(E),
}

/// Repeatedly fetch a resource's state until `is_ready` holds.
///
/// The first fetch is issued immediately; each miss sleeps `interval`
/// before the next attempt. Once the budget is exhausted no further fetch
/// is issued. Fetch failures propagate to the caller, which decides
/// whether they are fatal.
pub async fn wait_until<S, E, F, Fut, P>(
    mut fetch: F,
    is_ready: P,
    interval: Duration,
    budget: PollBudget,
) -> Result<S, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<S, E>>,
    P: Fn(&S) -> bool,
    E: std::error::Error,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        let state = fetch().await.map_err(WaitError::Fetch)?;
        attempts += 1;

        if is_ready(&state) {
            return Ok(state);
        }

        let exhausted = match budget {
            PollBudget::Attempts(max) => attempts >= max,
            PollBudget::Deadline(deadline) => start.elapsed() >= deadline,
        };
        if exhausted {
            return Err(WaitError::Timeout(WaitTimeout {
                elapsed: start.elapsed(),
                attempts,
            }));
        }

        tracing::debug!(attempts, "waiting for convergence");
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::convert::Infallible;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, Error)]
    #[error("fetch failed")]
    struct FetchFailed;

    #[tokio::test]
    async fn returns_immediately_when_ready_on_first_fetch() {
        let fetches = AtomicU32::new(0);
        let result: Result<_, WaitError<Infallible>> = wait_until(
            || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>("available")
            },
            |s| *s == "available",
            Duration::from_secs(1),
            PollBudget::Attempts(10),
        )
        .await;

        assert_eq!(result.unwrap(), "available");
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn single_attempt_budget_times_out_after_exactly_one_fetch() {
        let fetches = AtomicU32::new(0);
        let result: Result<&str, WaitError<Infallible>> = wait_until(
            || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>("creating")
            },
            |_| false,
            Duration::from_secs(1),
            PollBudget::Attempts(1),
        )
        .await;

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        match result {
            Err(WaitError::Timeout(t)) => assert_eq!(t.attempts, 1),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    /// Status transitions creating -> creating -> available across three
    /// poll cycles at a 1 s interval: the poller returns on the third
    /// fetch with roughly 2 s elapsed.
    #[tokio::test(start_paused = true)]
    async fn converges_on_third_fetch_for_delayed_transition() {
        let states = Mutex::new(VecDeque::from(["creating", "creating", "available"]));
        let start = Instant::now();

        let result: Result<&str, WaitError<Infallible>> = wait_until(
            || async {
                let state = states.lock().unwrap().pop_front().unwrap();
                Ok::<_, Infallible>(state)
            },
            |s| *s == "available",
            Duration::from_secs(1),
            PollBudget::Attempts(10),
        )
        .await;

        assert_eq!(result.unwrap(), "available");
        assert!(states.lock().unwrap().is_empty(), "exactly three fetches");
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_budget_stops_polling() {
        let fetches = AtomicU32::new(0);
        let result: Result<&str, WaitError<Infallible>> = wait_until(
            || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>("creating")
            },
            |_| false,
            Duration::from_secs(1),
            PollBudget::Deadline(Duration::from_secs(3)),
        )
        .await;

        match result {
            Err(WaitError::Timeout(t)) => {
                assert!(t.elapsed >= Duration::from_secs(3));
                assert_eq!(t.attempts, fetches.load(Ordering::SeqCst));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_errors_propagate_without_retry() {
        let fetches = AtomicU32::new(0);
        let result: Result<&str, WaitError<FetchFailed>> = wait_until(
            || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Err(FetchFailed)
            },
            |_| true,
            Duration::from_millis(10),
            PollBudget::Attempts(5),
        )
        .await;

        assert!(matches!(result, Err(WaitError::Fetch(_))));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
