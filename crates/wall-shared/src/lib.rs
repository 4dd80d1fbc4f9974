//! # Wall Shared
//!
//! Wire types shared by the wall server and its clients.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
