//! # domains
//!
//! The central domain model and port definitions for the puja blog API.
//! Nothing in here performs I/O; adapters live in the sibling crates.

pub mod delimited;
pub mod error;
pub mod models;
pub mod ports;
pub mod samples;

// Re-exporting for easier access in other crates
pub use delimited::DelimitedList;
pub use error::*;
pub use models::*;
pub use ports::*;
