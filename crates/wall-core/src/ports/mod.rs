//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod filler;
mod rate_limit;
mod repository;

pub use clock::{Clock, SystemClock};

#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use filler::FillerSource;
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, PostRepository, ReportRepository};
