//! Rate limiting port.

use std::time::Duration;

/// Rate limiter trait - throttles wall writes per client key.
///
/// Checks are synchronous so the middleware can decide before touching the
/// inner service.
pub trait RateLimiter: Send + Sync {
    /// Record a request for `key` and report whether it may proceed.
    fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
