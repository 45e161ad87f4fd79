use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use async_trait::async_trait;
use domains::{CredentialVerifier, Credentials};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("admin password hash is not a valid PHC string: {0}")]
    InvalidPhc(String),
}

/// Verifies the admin password against a stored Argon2 hash.
pub struct Argon2Verifier {
    username: String,
    phc: String,
}

impl Argon2Verifier {
    /// Rejects a malformed hash up front so a typo in configuration fails at
    /// boot rather than locking every admin request out.
    pub fn new(username: impl Into<String>, phc: impl Into<String>) -> Result<Self, HashError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|e| HashError::InvalidPhc(e.to_string()))?;
        Ok(Self {
            username: username.into(),
            phc,
        })
    }
}

#[async_trait]
impl CredentialVerifier for Argon2Verifier {
    async fn verify(&self, credentials: &Credentials) -> bool {
        if credentials.username != self.username {
            return false;
        }

        // CPU-bound, runs on the blocking pool.
        let phc = self.phc.clone();
        let password = credentials.password.expose_secret().as_bytes().to_vec();
        let outcome = tokio::task::spawn_blocking(move || {
            let parsed = match PasswordHash::new(&phc) {
                Ok(p) => p,
                Err(_) => return false,
            };
            Argon2::default().verify_password(&password, &parsed).is_ok()
        })
        .await;

        match outcome {
            Ok(matched) => matched,
            Err(e) => {
                error!(error = %e, "password verification task failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn verifies_hashed_password() {
        let verifier = Argon2Verifier::new("website-admin", hash("s3cret")).unwrap();
        assert!(verifier.verify(&Credentials::new("website-admin", "s3cret")).await);
        assert!(!verifier.verify(&Credentials::new("website-admin", "S3cret")).await);
        assert!(!verifier.verify(&Credentials::new("someone", "s3cret")).await);
    }

    #[test]
    fn malformed_hash_is_rejected() {
        assert!(matches!(
            Argon2Verifier::new("website-admin", "not-a-hash"),
            Err(HashError::InvalidPhc(_))
        ));
    }
}
