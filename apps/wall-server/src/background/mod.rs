//! Background processing: scheduled sweeps and filler posts.

mod scheduler;

#[cfg(feature = "scheduler")]
pub mod jobs;

pub use scheduler::SchedulerConfig;

#[cfg(feature = "scheduler")]
pub use scheduler::Scheduler;
