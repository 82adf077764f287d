//! Bounded retry with exponential backoff and jitter.
//!
//! Policy: a failed attempt is retried only when the error is transient
//! (`StockError::is_transient`), up to `max_retries` additional attempts,
//! sleeping `base_delay * 2^(n-1)` scaled by a uniform ±`jitter` factor
//! before retry `n`.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::gateway::StockError;

/// Retry policy for remote stock calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Backoff before the first retry; doubles per retry.
    pub base_delay: Duration,
    /// Jitter fraction, e.g. `0.5` spreads each delay across ±50%.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(2),
            jitter: 0.5,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries (used for best-effort upserts).
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            jitter: 0.0,
        }
    }

    /// Backoff before retry `retry` (1-based), jitter applied.
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        let nominal = self.base_delay.as_secs_f64() * f64::from(1u32 << exponent);
        let spread = if self.jitter > 0.0 {
            1.0 + rand::thread_rng().gen_range(-self.jitter..=self.jitter)
        } else {
            1.0
        };
        Duration::from_secs_f64((nominal * spread).max(0.0))
    }
}

/// Run `call` until it succeeds, fails non-transiently, or the policy's
/// attempts are exhausted. The final error always surfaces to the caller.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, StockError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StockError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt <= policy.max_retries => {
                let delay = policy.backoff_delay(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient stock call failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(operation, attempt, error = %err, "stock call failed");
                return Err(err);
            }
        }
    }
}
