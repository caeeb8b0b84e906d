//! # Domain Models
//!
//! Pure domain types for the arena: the `Generation` and `Vote` data contracts
//! and the bootstrap configuration consumed once at startup.
//! Keep it lean: no I/O, networking, or heavy logic, just data and the
//! validation that keeps every value well-formed.

pub mod config;
pub mod constants;
mod error;
pub mod models;
pub mod modules;

pub use error::{ModelError, ModelErrorExt};
