//! Rate Limiting Infrastructure
//!
//! Per-key limits (usually client IP) backed by a keyed `governor`
//! limiter. A key may spend `max_requests` at once, after which capacity
//! returns at a steady rate of `max_requests` per `window`.

use governor::clock::{Clock, DefaultClock};
use governor::middleware::StateInformationMiddleware;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Burst of `max_requests`, replenished evenly across `window`
    pub fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.max_requests).unwrap_or(NonZeroU32::MIN);
        Quota::with_period(self.window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// Time until the next request would be admitted (zero when allowed)
    pub retry_after: Duration,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    async fn check_and_increment(
        &self,
        key: &str,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

type KeyedLimiter =
    RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock, StateInformationMiddleware>;

/// Process-local rate limiter
///
/// Good enough for a single API instance. Idle keys are dropped once the
/// table grows past `PRUNE_THRESHOLD` entries.
pub struct InMemoryRateLimiter {
    limiter: KeyedLimiter,
    clock: DefaultClock,
}

const PRUNE_THRESHOLD: usize = 10_000;

impl InMemoryRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            limiter: RateLimiter::keyed(config.quota())
                .with_middleware::<StateInformationMiddleware>(),
            clock: DefaultClock::default(),
        }
    }

    /// Synchronous core of [`RateLimitStore::check_and_increment`]
    pub fn check(&self, key: &str) -> RateLimitResult {
        if self.limiter.len() > PRUNE_THRESHOLD {
            self.limiter.retain_recent();
        }

        match self.limiter.check_key(&key.to_string()) {
            Ok(snapshot) => RateLimitResult {
                allowed: true,
                remaining: snapshot.remaining_burst_capacity(),
                retry_after: Duration::ZERO,
            },
            Err(not_until) => {
                tracing::debug!(key, "Rate limit exhausted");
                RateLimitResult {
                    allowed: false,
                    remaining: 0,
                    retry_after: not_until.wait_time_from(self.clock.now()),
                }
            }
        }
    }
}

impl std::fmt::Debug for InMemoryRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRateLimiter")
            .field("keys", &self.limiter.len())
            .finish()
    }
}

impl RateLimitStore for InMemoryRateLimiter {
    async fn check_and_increment(
        &self,
        key: &str,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check(key))
    }
}
