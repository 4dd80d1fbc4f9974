//! In-memory per-client rate limiter using the governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};

use wall_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window, per client.
    pub max_requests: u32,
    /// Window duration.
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

/// Keyed GCRA limiter: every client key gets its own budget.
///
/// Limits are per-process, not distributed across instances.
pub struct KeyedRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl KeyedRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Result<Self, RateLimitError> {
        let burst = NonZeroU32::new(config.max_requests)
            .ok_or_else(|| RateLimitError::Backend("max_requests must be non-zero".to_string()))?;
        let quota = Quota::with_period(config.window / config.max_requests)
            .ok_or_else(|| RateLimitError::Backend("window must be non-zero".to_string()))?
            .allow_burst(burst);

        Ok(Self {
            limiter: DefaultKeyedRateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        })
    }

    /// Drop state for clients whose budget has fully recovered.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of client keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

impl RateLimiter for KeyedRateLimiter {
    fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Ok(RateLimitResult {
                allowed: true,
                reset_after: Duration::ZERO,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                reset_after: not_until.wait_time_from(self.clock.now()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32) -> KeyedRateLimiter {
        KeyedRateLimiter::new(&RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
        })
        .unwrap()
    }

    #[test]
    fn test_burst_then_reject() {
        let limiter = limiter(2);

        assert!(limiter.check("10.0.0.1").unwrap().allowed);
        assert!(limiter.check("10.0.0.1").unwrap().allowed);

        let denied = limiter.check("10.0.0.1").unwrap();
        assert!(!denied.allowed);
        assert!(denied.reset_after > Duration::ZERO);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = limiter(1);

        assert!(limiter.check("10.0.0.1").unwrap().allowed);
        assert!(!limiter.check("10.0.0.1").unwrap().allowed);
        assert!(limiter.check("10.0.0.2").unwrap().allowed);
        assert_eq!(limiter.tracked_keys(), 2);
    }

    #[test]
    fn test_zero_requests_is_rejected() {
        let config = RateLimitConfig {
            max_requests: 0,
            window: Duration::from_secs(60),
        };
        assert!(KeyedRateLimiter::new(&config).is_err());
    }
}
