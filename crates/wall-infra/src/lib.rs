//! # Wall Infrastructure
//!
//! Concrete implementations of the ports defined in `wall-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `rate-limit` - Per-client write throttling via governor

pub mod database;
pub mod filler;
pub mod memory;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use database::DatabaseConnections;
pub use filler::RotatingFillerSource;
pub use memory::{InMemoryPostRepository, InMemoryReportRepository};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{KeyedRateLimiter, RateLimitConfig};
