//! Rate limiter module for controlling API request rates
//!
//! Client-side throttling with the `governor` crate, so bursts of reloads
//! triggered by refresh signals cannot flood the backend.

use crate::application::config::RateLimiterConfig;
use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const FALLBACK_BURST: NonZeroU32 = NonZeroU32::MIN.saturating_add(9);

/// Rate limiter for controlling API request rates
///
/// Token bucket: `burst_size` requests may go out at once, then one request
/// is replenished every `period_seconds / max_requests`.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock>>,
}

impl RateLimiter {
    /// Creates a new rate limiter from configuration
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        let burst_size = NonZeroU32::new(config.burst_size).unwrap_or(FALLBACK_BURST);
        let max_requests = config.max_requests.max(1);
        let replenish_every =
            Duration::from_secs(config.period_seconds.max(1)) / max_requests;

        let quota = Quota::with_period(replenish_every)
            .unwrap_or_else(|| Quota::per_second(FALLBACK_BURST))
            .allow_burst(burst_size);

        Self {
            limiter: Arc::new(GovernorRateLimiter::direct(quota)),
        }
    }

    /// Waits until a request can be made according to the rate limit
    pub async fn wait(&self) {
        while self.limiter.check().is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Checks if a request can be made immediately, consuming a permit if so
    #[must_use]
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limiter", &"GovernorRateLimiter")
            .finish()
    }
}
