//! Sending a request again after it fails.
//!
//! A second attempt is made only when it cannot double up an effect. A rate
//! limit refusal means nothing happened, so any request goes again. A 5xx or
//! a dropped connection may hide a request that was applied, so only
//! [`Replay::Safe`] requests go again; an `addComment` or `createCheckRun`
//! that hit a 502 is reported as failed rather than risk a duplicate.
//!
//! Delays double from `initial_delay` up to `max_delay`.

use std::future::Future;
use std::time::Duration;

use crate::effects::Replay;

use super::error::TransportError;

/// How many times, and how far apart, a request is sent again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts after the first one.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryConfig {
    /// 3 retries, 2s apart and doubling (2s, 4s, 8s).
    pub const DEFAULT: Self = Self {
        max_retries: 3,
        initial_delay: Duration::from_secs(2),
        max_delay: Duration::from_secs(16),
    };

    /// For Enterprise hosts that hand out secondary rate limits under load:
    /// 6 retries from 1s, capped at 30s.
    pub const PATIENT: Self = Self {
        max_retries: 6,
        initial_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(30),
    };

    /// The wait before retry number `retry` (0 for the first retry).
    pub fn delay_before(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whether the transport retries at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Retry when the failure kind and the request's [`Replay`] allow it.
    #[default]
    ByReplay,

    /// One attempt per request, whatever the failure.
    Never,
}

/// Runs `attempt` until it succeeds or the failure may not be retried.
///
/// `operation` names the request in logs (`addComment`, `PATCH milestone`).
pub async fn send_with_retry<T, F, Fut>(
    config: RetryConfig,
    policy: RetryPolicy,
    operation: &str,
    replay: Replay,
    mut attempt: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    let mut retries = 0;
    loop {
        let err = match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if policy == RetryPolicy::Never || retries >= config.max_retries {
            return Err(err);
        }
        if !err.kind.allows_retry(replay) {
            if replay == Replay::Unsafe && err.kind.allows_retry(Replay::Safe) {
                tracing::warn!(
                    operation,
                    error = %err,
                    "Request may have been applied, not sending it again"
                );
            }
            return Err(err);
        }

        let delay = config.delay_before(retries);
        retries += 1;
        tracing::warn!(
            operation,
            retry = retries,
            kind = ?err.kind,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "GitHub API call failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
