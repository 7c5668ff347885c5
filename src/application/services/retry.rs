//! # Call Policy Enforcement
//!
//! Deadlines and retries around external calls.
//!
//! [`call_carrier`] bounds every carrier call attempt with the policy's
//! timeout and retries transient failures ([`CarrierError::is_retryable`])
//! with exponential back-off and jitter. Rejections and other final errors
//! are returned immediately. [`with_deadline`] only bounds a conversion
//! call; conversions are never retried.

use crate::infrastructure::carrier::{CarrierError, CarrierResult};
use crate::infrastructure::config::CallPolicy;
use crate::infrastructure::conversion::{ConversionError, ConversionResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

const MAX_DELAY_MS: u64 = 30_000;

/// Runs a carrier call under the policy's deadline and retry budget.
///
/// Back-off schedule with `backoff_base_ms = 250`:
///
/// | Retry | Sleep before it                |
/// |-------|--------------------------------|
/// | 1     | 250 ms × 2⁰ ± 25 % jitter      |
/// | 2     | 250 ms × 2¹ ± 25 % jitter      |
/// | 3     | 250 ms × 2² ± 25 % jitter      |
///
/// The delay is capped at 30 s and never shorter than a rate limit's
/// `retry_after_ms`.
///
/// # Errors
///
/// Returns the last `CarrierError`, or `CarrierError::Timeout` when the
/// final attempt exceeded its deadline.
pub async fn call_carrier<T, F, Fut>(
    policy: &CallPolicy,
    operation: &'static str,
    mut call: F,
) -> CarrierResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CarrierResult<T>>,
{
    let mut attempt = 0u32;
    loop {
        let outcome = match timeout(policy.timeout(), call()).await {
            Ok(result) => result,
            Err(_) => Err(CarrierError::timeout_with_duration(
                format!("{operation} exceeded its deadline"),
                policy.timeout_ms,
            )),
        };
        match outcome {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(policy.backoff_base_ms, attempt, err.retry_after_ms());
                tracing::warn!(
                    operation,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms,
                    error = %err,
                    "transient carrier error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Runs a conversion call under the policy's deadline.
///
/// # Errors
///
/// Returns the call's own error, or `ConversionError::Timeout`.
pub async fn with_deadline<T, Fut>(
    policy: &CallPolicy,
    operation: &'static str,
    call: Fut,
) -> ConversionResult<T>
where
    Fut: Future<Output = ConversionResult<T>>,
{
    timeout(policy.timeout(), call)
        .await
        .unwrap_or_else(|_| Err(ConversionError::timeout(operation, policy.timeout_ms)))
}

fn backoff_delay_ms(base_ms: u64, attempt: u32, retry_after_ms: Option<u64>) -> u64 {
    let exponent = attempt.saturating_sub(1).min(10);
    let capped = base_ms.saturating_mul(1u64 << exponent).min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    jittered.max(retry_after_ms.unwrap_or(0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(max_retries: u32) -> CallPolicy {
        CallPolicy::default()
            .with_max_retries(max_retries)
            .with_backoff_base_ms(0)
            .with_timeout_ms(1_000)
    }

    #[tokio::test]
    async fn succeeds_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = call_carrier(&policy(3), "catalog", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, CarrierError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = call_carrier(&policy(3), "detail", || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(CarrierError::connection("reset"))
                } else {
                    Ok(42)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_rejections() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result: CarrierResult<u32> = call_carrier(&policy(3), "quote", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(CarrierError::rejected("no service to destination"))
            }
        })
        .await;
        assert!(matches!(result, Err(CarrierError::Rejected { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_retry_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result: CarrierResult<u32> = call_carrier(&policy(2), "quote", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(CarrierError::timeout("slow"))
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn slow_call_times_out() {
        let policy = policy(0).with_timeout_ms(20);
        let result: CarrierResult<u32> = call_carrier(&policy, "catalog", || async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(1)
        })
        .await;
        assert!(matches!(
            result,
            Err(CarrierError::Timeout {
                timeout_ms: Some(20),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn conversion_deadline() {
        let policy = policy(0).with_timeout_ms(20);
        let result: ConversionResult<u32> = with_deadline(&policy, "currency conversion", async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(1)
        })
        .await;
        assert_eq!(
            result.unwrap_err(),
            ConversionError::timeout("currency conversion", 20)
        );
    }

    #[test]
    fn backoff_grows_and_respects_retry_after() {
        let first = backoff_delay_ms(1_000, 1, None);
        assert!((750..=1_250).contains(&first));
        let third = backoff_delay_ms(1_000, 3, None);
        assert!((3_000..=5_000).contains(&third));
        assert_eq!(backoff_delay_ms(0, 1, Some(400)), 400);
        assert!(backoff_delay_ms(1_000_000, 10, None) <= 37_500);
    }
}
