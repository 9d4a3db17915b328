//! Bounded retry/poll combinator
//!
//! The UI is eventually consistent: spinners, pagination, popup windows
//! that open before their content settles. Extraction adapters and
//! cleanup flows wait through [`poll_until`]; the reconciler itself
//! never retries, because a wrong-data observation is a real result.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{E2eError, E2eResult};

/// Outcome of one poll attempt.
#[derive(Debug)]
pub enum Readiness<T> {
    /// Stable snapshot obtained.
    Ready(T),
    /// Nothing rendered yet; wait and try again.
    Pending,
    /// Rendered, but in a wrong state that needs a fresh attempt, e.g. a
    /// Review popup showing "pagination not ready". Distinct from
    /// Pending so a timeout can report what was actually on screen.
    Stale(String),
}

/// Interval/backoff/deadline for a poll loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub interval: Duration,
    /// Multiplier applied to the interval after each attempt; 1.0 keeps
    /// a fixed cadence.
    pub backoff: f64,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(250),
            backoff: 1.0,
            timeout: Duration::from_secs(15),
        }
    }
}

impl RetryPolicy {
    /// Short fixed-cadence policy for cleanup steps.
    pub fn cleanup() -> Self {
        Self {
            interval: Duration::from_millis(500),
            backoff: 1.0,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Poll `check` until it reports ready or the policy's deadline passes.
///
/// On timeout the error distinguishes a surface that never rendered from
/// one that rendered in the wrong state, carrying the last stale
/// observation. `what` names the awaited surface for logs and errors.
pub async fn poll_until<T, F, Fut>(policy: &RetryPolicy, what: &str, mut check: F) -> E2eResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<Readiness<T>>>,
{
    let deadline = Instant::now() + policy.timeout;
    let mut interval = policy.interval;
    let mut attempts = 0;
    let mut last_state: Option<String> = None;

    loop {
        attempts += 1;
        match check().await? {
            Readiness::Ready(value) => {
                debug!(what, attempts, "ready");
                return Ok(value);
            }
            Readiness::Pending => {
                debug!(what, attempts, "pending");
            }
            Readiness::Stale(state) => {
                warn!(what, attempts, %state, "ready in wrong state; retrying");
                last_state = Some(state);
            }
        }

        if Instant::now() + interval > deadline {
            return Err(E2eError::ExtractionTimeout {
                what: what.to_string(),
                attempts,
                last_state,
            });
        }

        tokio::time::sleep(interval).await;
        interval = interval.mul_f64(policy.backoff.max(1.0));
    }
}
