//! Domain entities - the core business objects.

mod post;
mod report;

pub use post::{ActivePost, Post};
pub use report::Report;
