//! # Minutes Domain
//!
//! Domain types for the Minutes meeting-notes client.
//!
//! This crate contains:
//! - Wire types for users, meetings, action items, summaries and calendar
//!   events
//! - The client error taxonomy and Result definition
//! - Client configuration structures
//! - Constants shared by the core and infrastructure crates
//!
//! ## Architecture
//! - No dependencies on other Minutes crates
//! - No I/O; summary decoding is pure and never fails the caller

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
