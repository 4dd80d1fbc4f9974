//! # Wall Core
//!
//! The domain layer of the message wall: posts, reports, the abuse filter
//! and the service enforcing expiry and admission rules.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod moderation;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use moderation::{AbuseFilter, AbuseKind};
pub use service::{WallPolicy, WallService};
