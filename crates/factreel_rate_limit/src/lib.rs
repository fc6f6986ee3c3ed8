//! Retry, timeout, and rate limiting for provider calls.
//!
//! Every call the pipeline makes to a generative service goes through a
//! [`CallPolicy`]:
//!
//! - an optional [`RateLimiter`] per provider (governor GCRA plus a
//!   concurrency semaphore),
//! - a per-attempt timeout that surfaces as a retryable `Timeout` error,
//! - bounded exponential backoff with jitter for transient errors only.

mod config;
mod limiter;
mod policy;

pub use config::{
    ProviderLimits, ProviderLimitsBuilder, RateLimitsConfig, RetryConfig, RetryConfigBuilder,
};
pub use limiter::{RateLimiter, RateLimiterGuard};
pub use policy::CallPolicy;
