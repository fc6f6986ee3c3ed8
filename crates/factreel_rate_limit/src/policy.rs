//! Timeout, rate limiting, and transient-only retry around provider calls.

use crate::{RateLimiter, RateLimitsConfig, RetryConfig};
use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind, RetryableError};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, instrument, warn};

/// How provider calls are guarded.
///
/// The first attempt runs immediately. If it fails with a transient error,
/// the backoff schedule is chosen from that error's kind (then adjusted by
/// any overrides in [`RetryConfig`]). Each retry sleeps for its delay before
/// running, and at most `max_retries` retries follow the first attempt.
#[derive(Debug, Clone, Default)]
pub struct CallPolicy {
    retry: RetryConfig,
    limiters: HashMap<String, RateLimiter>,
}

impl CallPolicy {
    /// Policy with retry settings and no rate limits.
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            retry,
            limiters: HashMap::new(),
        }
    }

    /// Policy with a limiter for every provider that has limits configured.
    pub fn from_config(retry: RetryConfig, limits: &RateLimitsConfig) -> Self {
        let limiters = limits
            .iter()
            .filter(|(_, l)| l.is_limited())
            .map(|(name, l)| (name.to_string(), RateLimiter::new(l)))
            .collect();
        Self { retry, limiters }
    }

    /// Add or replace the limiter for `provider`.
    pub fn with_limiter(mut self, provider: impl Into<String>, limiter: RateLimiter) -> Self {
        self.limiters.insert(provider.into(), limiter);
        self
    }

    /// Retry settings in effect.
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Run `f` under this policy.
    ///
    /// `f` is invoked once per attempt. Each attempt waits for the
    /// provider's limiter (if any) and is cut off after the configured call
    /// timeout with a retryable `Timeout` error. A timeout of 0 means no limit.
    #[instrument(skip(self, f))]
    pub async fn call<T, F, Fut>(&self, provider: &str, operation: &str, mut f: F) -> FactreelResult<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = FactreelResult<T>> + Send,
        T: Send,
    {
        let err = match self.attempt(provider, f()).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !err.is_retryable() {
            warn!(error = %err, "Permanent error, failing immediately");
            return Err(err);
        }
        if !*self.retry.enabled() {
            debug!(error = %err, "Retry disabled");
            return Err(err);
        }

        let (initial_ms, max_retries, max_delay_secs) =
            self.retry.resolve(err.retry_strategy_params());
        if max_retries == 0 {
            return Err(err);
        }

        info!(
            error = %err,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Call failed, will retry with configured strategy"
        );

        // Every retry waits out its delay first, including the first one.
        let delays = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        let mut last = err;
        for (retry, delay) in delays.enumerate() {
            tokio::time::sleep(delay).await;
            match self.attempt(provider, f()).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(retry = retry + 1, error = %e, "Call failed, will retry");
                    last = e;
                }
                Err(e) => {
                    warn!(error = %e, "Permanent error, failing immediately");
                    return Err(e);
                }
            }
        }

        warn!(error = %last, max_retries, "Retries exhausted");
        Err(last)
    }

    async fn attempt<T, Fut>(&self, provider: &str, fut: Fut) -> FactreelResult<T>
    where
        Fut: Future<Output = FactreelResult<T>>,
    {
        let _guard = match self.limiters.get(provider) {
            Some(limiter) => Some(limiter.acquire().await),
            None => None,
        };

        let Some(limit) = self.retry.call_timeout() else {
            return fut.await;
        };

        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::new(
                provider,
                ProviderErrorKind::Timeout(*self.retry.call_timeout_secs()),
            )
            .into()),
        }
    }
}
