//! Admin gate for mutating routes.
//!
//! Every admin call re-presents credentials; there is no session. Only the
//! outcome of an attempt is logged, never the submitted username or password.

use std::sync::Arc;

use domains::{AppError, CredentialVerifier, Credentials, Result};
use tracing::{info, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Proof that the current request passed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGrant {
    _private: (),
}

impl AdminGrant {
    pub fn is_admin(&self) -> bool {
        true
    }
}

pub struct AdminGate {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AdminGate {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    pub async fn authorize(&self, credentials: &Credentials) -> Result<AdminGrant> {
        if self.verifier.verify(credentials).await {
            info!(outcome = "granted", "admin authentication attempt");
            Ok(AdminGrant { _private: () })
        } else {
            warn!(outcome = "rejected", "admin authentication attempt");
            Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
        }
    }
}
