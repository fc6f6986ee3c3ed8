//! Rate limiter implementation using governor and Tokio Semaphore.
//!
//! Requests per minute are enforced with governor's GCRA limiter; requests
//! in flight are bounded by a semaphore whose permit lives in the returned
//! guard.

use crate::ProviderLimits;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter for a single provider.
///
/// Cloning shares the underlying quota, so every clone draws from the same
/// budget.
///
/// # Example
///
/// ```
/// use factreel_rate_limit::{ProviderLimits, RateLimiter};
///
/// let limits = ProviderLimits::builder().rpm(60u32).max_concurrent(1u32).build().unwrap();
/// let limiter = RateLimiter::new(&limits);
/// let guard = limiter.try_acquire();
/// assert!(guard.is_some());
/// // Concurrency slot is held until the guard drops
/// assert!(limiter.try_acquire().is_none());
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl RateLimiter {
    /// Create a limiter enforcing every limit set in `limits`.
    pub fn new(limits: &ProviderLimits) -> Self {
        let rpm_limiter = limits.rpm().and_then(|rpm| {
            NonZeroU32::new(rpm).map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))))
        });

        let max_concurrent = limits
            .max_concurrent()
            .map(|n| n.max(1) as usize)
            .unwrap_or(Semaphore::MAX_PERMITS);

        Self {
            rpm_limiter,
            concurrent_semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Wait until a request is allowed.
    ///
    /// The RPM quota is awaited first so the concurrency slot is not held
    /// while waiting.
    pub async fn acquire(&self) -> RateLimiterGuard {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        // The semaphore is never closed, so a permit is always granted.
        let permit = self.concurrent_semaphore.clone().acquire_owned().await.ok();

        RateLimiterGuard { _permit: permit }
    }

    /// Try to acquire without waiting.
    ///
    /// Returns `None` if any limit would block.
    pub fn try_acquire(&self) -> Option<RateLimiterGuard> {
        let permit = self.concurrent_semaphore.clone().try_acquire_owned().ok()?;

        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }

        Some(RateLimiterGuard {
            _permit: Some(permit),
        })
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("rpm_limited", &self.rpm_limiter.is_some())
            .field(
                "available_permits",
                &self.concurrent_semaphore.available_permits(),
            )
            .finish()
    }
}

/// Holds a concurrency slot until dropped.
#[derive(Debug)]
pub struct RateLimiterGuard {
    _permit: Option<OwnedSemaphorePermit>,
}
