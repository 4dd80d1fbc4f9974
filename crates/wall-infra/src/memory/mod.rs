//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart.

mod post;
mod report;

pub use post::InMemoryPostRepository;
pub use report::InMemoryReportRepository;
