//! # services
//!
//! Use cases over the domain ports. Handlers call into here and never touch
//! a repository or verifier directly.

pub mod admin_gate;
pub mod post_service;

pub use admin_gate::{AdminGate, AdminGrant};
pub use post_service::PostService;
