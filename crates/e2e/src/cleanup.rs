//! Teardown discipline
//!
//! Cleanup (closing pages, deleting the case through its stacked
//! confirmation dialogs, removing session files) runs after a test has
//! already passed or failed on its own merits. A cleanup error must
//! never mask that primary outcome, so cleanup steps are wrapped to log
//! and swallow failures, with bounded polling for flaky dialogs.

use std::future::Future;

use tracing::warn;

use crate::error::E2eResult;
use crate::retry::{poll_until, Readiness, RetryPolicy};

/// Log and drop a secondary failure. Returns whether the step succeeded.
pub fn swallow<T>(what: &str, result: E2eResult<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            warn!(what, error = %e, "cleanup step failed; continuing");
            false
        }
    }
}

/// Run an async cleanup step, logging and dropping any failure.
pub async fn swallow_async<T, Fut>(what: &str, fut: Fut) -> bool
where
    Fut: Future<Output = E2eResult<T>>,
{
    swallow(what, fut.await)
}

/// Give a flaky cleanup step bounded retries before giving up on it.
/// Failure is logged, never propagated.
pub async fn retry_cleanup<T, F, Fut>(policy: &RetryPolicy, what: &str, check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<Readiness<T>>>,
{
    swallow(what, poll_until(policy, what, check).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::E2eError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn swallow_reports_success_and_failure() {
        assert!(swallow("close page", Ok(())));
        assert!(!swallow(
            "close page",
            Err::<(), _>(E2eError::StepFailed {
                step: "close".to_string(),
                reason: "already gone".to_string(),
            })
        ));
    }

    #[tokio::test]
    async fn swallow_async_drops_the_failure() {
        assert!(swallow_async("close context", async { Ok(()) }).await);
        let failed = async {
            Err::<(), _>(E2eError::StepFailed {
                step: "delete case".to_string(),
                reason: "second confirm dialog never appeared".to_string(),
            })
        };
        assert!(!swallow_async("delete case", failed).await);
    }

    #[tokio::test]
    async fn cleanup_policy_drives_a_retry() {
        let calls = AtomicUsize::new(0);
        let ok = retry_cleanup(&RetryPolicy::cleanup(), "final confirm", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Ok(Readiness::Pending)
                } else {
                    Ok(Readiness::Ready(()))
                }
            }
        })
        .await;
        assert!(ok);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_cleanup_retries_then_succeeds() {
        let policy = RetryPolicy {
            interval: Duration::from_millis(5),
            backoff: 1.0,
            timeout: Duration::from_millis(200),
        };
        let calls = AtomicUsize::new(0);
        let ok = retry_cleanup(&policy, "confirm dialog", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Ok(Readiness::Pending)
                } else {
                    Ok(Readiness::Ready(()))
                }
            }
        })
        .await;
        assert!(ok);
    }

    #[tokio::test]
    async fn retry_cleanup_gives_up_quietly() {
        let policy = RetryPolicy {
            interval: Duration::from_millis(5),
            backoff: 1.0,
            timeout: Duration::from_millis(30),
        };
        let ok = retry_cleanup::<(), _, _>(&policy, "confirm dialog", || async {
            Ok(Readiness::Pending)
        })
        .await;
        assert!(!ok);
    }
}
