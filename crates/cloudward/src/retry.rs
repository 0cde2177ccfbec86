//! Rate-limit retry around a single provider call

use crate::cancel::CancelToken;
use crate::error::{CloudError, Result};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Max number of retries after a rate-limit rejection.
pub const MAX_RETRIES: u32 = 10;

/// Backoff applied when the rejection carries no usable `retryAfter`.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Retry policy for a single provider call.
///
/// Owned per invocation; the attempt counter is never shared across
/// calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries allowed after the initial attempt.
    pub max_retries: u32,

    /// Wait used when the provider supplies no `retryAfter` hint.
    pub default_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            default_backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_default_backoff(mut self, backoff: Duration) -> Self {
        self.default_backoff = backoff;
        self
    }
}

/// Rate-limit rejection body. Providers report the limit under either
/// `overLimit` or `overLimitFault`.
#[derive(Debug, Deserialize)]
struct RateLimitBody {
    #[serde(rename = "overLimit")]
    over_limit: Option<OverLimit>,
    #[serde(rename = "overLimitFault")]
    over_limit_fault: Option<OverLimit>,
}

#[derive(Debug, Deserialize)]
struct OverLimit {
    #[serde(rename = "retryAfter")]
    retry_after: Option<RetryAfter>,
}

/// `retryAfter` arrives as a number from some providers and as a
/// numeric string from others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RetryAfter {
    Seconds(u64),
    Text(String),
}

impl RetryAfter {
    fn as_secs(&self) -> Option<u64> {
        match self {
            RetryAfter::Seconds(secs) => Some(*secs),
            RetryAfter::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Server-suggested over-limit marker extracted from a rejection body.
/// A malformed body yields `None`, not an error.
fn over_limit_hint(body: &str) -> Option<OverLimit> {
    let parsed: RateLimitBody = serde_json::from_str(body).ok()?;
    parsed.over_limit.or(parsed.over_limit_fault)
}

/// Runs `op`, retrying rate-limited calls with the provider-suggested
/// backoff.
///
/// Only [`CloudError::RateLimited`] rejections whose body carries an
/// over-limit marker are retried, at most `config.max_retries` times;
/// everything else propagates unchanged on the first failure. The
/// token is checked before every wait, so a halted task fails fast
/// with [`CloudError::Cancelled`] instead of sleeping out the backoff.
pub async fn execute_with_retry<T, F, Fut>(
    cancel: &CancelToken,
    config: &RetryConfig,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retries = 0u32;

    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let CloudError::RateLimited { ref body } = err else {
            return Err(err);
        };

        if body.is_empty() || retries >= config.max_retries {
            return Err(err);
        }

        let Some(limit) = over_limit_hint(body) else {
            return Err(err);
        };

        cancel.checkpoint()?;

        let wait = limit
            .retry_after
            .and_then(|after| after.as_secs())
            .map(Duration::from_secs)
            .unwrap_or(config.default_backoff);

        tracing::debug!(
            "provider over limit, waiting {}s before retrying",
            wait.as_secs()
        );

        sleep(wait).await;
        retries += 1;
    }
}
