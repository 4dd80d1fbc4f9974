//! Application services built on the domain and ports.

mod wall;

pub use wall::{MAX_IMAGE_URL_LENGTH, MAX_REPORT_REASON_LENGTH, WallPolicy, WallService};
