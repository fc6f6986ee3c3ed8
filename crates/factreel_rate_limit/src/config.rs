//! Retry and rate limit settings.
//!
//! Both structures deserialize from the `[retry]` and `[rate_limits]`
//! sections of `factreel.toml`. Missing fields fall back to the defaults
//! below.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Retry and timeout behavior for provider calls.
///
/// Backoff parameters left as `None` are chosen per error kind (a 429 waits
/// longer than a 500). Setting them overrides the per-kind choice for every
/// error.
///
/// ```toml
/// [retry]
/// enabled = true
/// max_retries = 3
/// call_timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(default)]
pub struct RetryConfig {
    /// Retry transient failures at all
    #[builder(default = "true")]
    enabled: bool,
    /// Override for the first backoff delay in milliseconds
    #[builder(default)]
    initial_backoff_ms: Option<u64>,
    /// Override for the number of retries after the first attempt
    #[builder(default)]
    max_retries: Option<usize>,
    /// Override for the longest single backoff delay in seconds
    #[builder(default)]
    max_delay_secs: Option<u64>,
    /// Time limit for one attempt, in seconds; 0 disables the limit
    #[builder(default = "120")]
    call_timeout_secs: u64,
}

impl RetryConfig {
    /// Creates a new builder for `RetryConfig`.
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    /// Time limit for one attempt, or `None` when `call_timeout_secs` is 0.
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.call_timeout_secs > 0).then(|| Duration::from_secs(self.call_timeout_secs))
    }

    /// Apply the overrides to per-kind `(initial_ms, max_retries, max_delay_secs)`.
    pub fn resolve(&self, params: (u64, usize, u64)) -> (u64, usize, u64) {
        let (initial_ms, retries, max_delay) = params;
        (
            self.initial_backoff_ms.unwrap_or(initial_ms),
            self.max_retries.unwrap_or(retries),
            self.max_delay_secs.unwrap_or(max_delay),
        )
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_backoff_ms: None,
            max_retries: None,
            max_delay_secs: None,
            call_timeout_secs: 120,
        }
    }
}

/// Quota for one provider. `None` means unlimited.
///
/// ```toml
/// [rate_limits.openai]
/// rpm = 50
/// max_concurrent = 1
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters,
)]
#[builder(setter(into, strip_option), default)]
#[serde(default)]
pub struct ProviderLimits {
    /// Requests per minute
    rpm: Option<u32>,
    /// Requests in flight at once
    max_concurrent: Option<u32>,
}

impl ProviderLimits {
    /// Creates a new builder for `ProviderLimits`.
    pub fn builder() -> ProviderLimitsBuilder {
        ProviderLimitsBuilder::default()
    }

    /// Whether any limit is set.
    pub fn is_limited(&self) -> bool {
        self.rpm.is_some() || self.max_concurrent.is_some()
    }
}

/// Per-provider quotas keyed by provider name (`openai`, `elevenlabs`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateLimitsConfig(HashMap<String, ProviderLimits>);

impl RateLimitsConfig {
    /// Limits for `provider`, if configured.
    pub fn get(&self, provider: &str) -> Option<&ProviderLimits> {
        self.0.get(provider)
    }

    /// Set limits for `provider`.
    pub fn insert(&mut self, provider: impl Into<String>, limits: ProviderLimits) {
        self.0.insert(provider.into(), limits);
    }

    /// All configured providers and their limits.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderLimits)> {
        self.0.iter().map(|(name, limits)| (name.as_str(), limits))
    }
}
