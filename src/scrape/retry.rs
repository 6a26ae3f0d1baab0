//! Bounded retry around render-context operations
//!
//! Every operation that touches the live page can fail transiently: a
//! navigation timeout, a content wait that never sees its selector, a
//! detached element handle. `with_retry` re-invokes such operations up to a
//! fixed attempt budget with exponential backoff, failing fast on errors
//! the classifier deems permanent.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Typed outcome of a retried operation's failure.
///
/// Callers treat both variants identically (the operation failed for good);
/// the split exists so the original error survives with an explicit
/// exhaustion annotation instead of being rewrapped per attempt.
#[derive(Debug, Error)]
pub enum RetryError {
    #[error("{operation} failed after {attempts} attempts: {source:#}")]
    Exhausted {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
    #[error("{operation} failed: {source:#}")]
    Fatal {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl RetryError {
    /// The underlying error, regardless of variant.
    #[must_use]
    pub fn source_error(&self) -> &anyhow::Error {
        match self {
            Self::Exhausted { source, .. } | Self::Fatal { source, .. } => source,
        }
    }
}

/// Classify an error as transient (worth re-invoking) or permanent.
///
/// Permanent errors mean the browser or page state is broken; retrying the
/// same operation against a dead session cannot succeed. Timeouts and
/// stale/missing element references are the site being slow or re-rendering
/// mid-read, which a fresh invocation regularly survives. Unknown errors
/// default to transient.
#[must_use]
pub fn is_transient(error: &anyhow::Error) -> bool {
    let msg = format!("{error:#}").to_lowercase();

    if msg.contains("browser closed")
        || msg.contains("browser disconnected")
        || msg.contains("page closed")
        || msg.contains("target closed")
        || msg.contains("session not found")
        || msg.contains("session closed")
        || msg.contains("websocket")
        || msg.contains("channel")
    {
        return false;
    }

    if msg.contains("timeout")
        || msg.contains("timed out")
        || msg.contains("detached")
        || msg.contains("stale")
        || msg.contains("not found")
        || msg.contains("no node")
    {
        return true;
    }

    true
}

/// Invoke `f` up to `max_attempts` times, sleeping between attempts.
///
/// The attempt counter is explicit and counts total invocations: a budget
/// of 3 is one try plus two retries. Backoff doubles per attempt from
/// 200ms with up to 100ms of jitter. Each call site carries its own budget;
/// a failure in one never consumes another's.
pub async fn with_retry<F, Fut, T>(
    operation: &'static str,
    max_attempts: u32,
    f: F,
) -> Result<T, RetryError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    debug_assert!(max_attempts >= 1, "attempt budget must allow one try");
    let mut attempt: u32 = 1;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if !is_transient(&e) => {
                warn!("{operation}: permanent error, failing fast: {e:#}");
                return Err(RetryError::Fatal {
                    operation,
                    source: e,
                });
            }
            Err(e) if attempt >= max_attempts => {
                warn!("{operation}: attempt budget ({max_attempts}) exhausted: {e:#}");
                return Err(RetryError::Exhausted {
                    operation,
                    attempts: attempt,
                    source: e,
                });
            }
            Err(e) => {
                let delay_ms =
                    2u64.saturating_pow(attempt - 1) * 200 + rand::rng().random_range(0..100);
                warn!(
                    "{operation}: transient error on attempt {attempt}/{max_attempts}, \
                     retrying in {delay_ms}ms: {e:#}"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_without_consuming_budget() {
        let calls = AtomicU32::new(0);
        let result = with_retry("op", 3, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, anyhow::Error>(42) }
        })
        .await
        .unwrap();
        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invokes_at_most_max_attempts() {
        let calls = AtomicU32::new(0);
        let err = with_retry("op", 3, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(anyhow!("navigation timeout")) }
        })
        .await
        .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            RetryError::Exhausted { attempts, source, .. } => {
                assert_eq!(attempts, 3);
                assert!(source.to_string().contains("navigation timeout"));
            }
            RetryError::Fatal { .. } => panic!("expected exhaustion"),
        }
    }

    #[tokio::test]
    async fn permanent_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let err = with_retry("op", 5, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(anyhow!("browser closed")) }
        })
        .await
        .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, RetryError::Fatal { .. }));
    }

    #[tokio::test]
    async fn recovers_when_a_later_attempt_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_retry("op", 3, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 1 {
                    Err(anyhow!("element detached"))
                } else {
                    Ok("ok")
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(result, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn classifier_matches_transient_patterns() {
        assert!(is_transient(&anyhow!("timeout waiting for selector")));
        assert!(is_transient(&anyhow!("element is stale")));
        assert!(is_transient(&anyhow!("node detached from document")));
        assert!(!is_transient(&anyhow!("browser closed unexpectedly")));
        assert!(!is_transient(&anyhow!("websocket connection lost")));
    }
}
