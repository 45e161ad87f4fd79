//! # auth-adapters
//!
//! Implementations of `CredentialVerifier`.
//!
//! * [`SharedSecretVerifier`]: exact match against a configured pair.
//! * [`Argon2Verifier`]: exact username match, password checked against an
//!   Argon2 PHC hash so the plain secret never has to sit in the environment.

mod argon;
mod shared_secret;

pub use argon::{Argon2Verifier, HashError};
pub use shared_secret::SharedSecretVerifier;
