//! SeaORM entities for the wall tables.

pub mod post;
pub mod report;
