use async_trait::async_trait;
use domains::{CredentialVerifier, Credentials};
use secrecy::{ExposeSecret, SecretString};

/// Single static admin pair, compared byte for byte.
pub struct SharedSecretVerifier {
    username: String,
    password: SecretString,
}

impl SharedSecretVerifier {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

#[async_trait]
impl CredentialVerifier for SharedSecretVerifier {
    async fn verify(&self, credentials: &Credentials) -> bool {
        // Both halves are always evaluated.
        let user_ok = credentials.username == self.username;
        let pass_ok = credentials.password.expose_secret() == self.password.expose_secret();
        user_ok & pass_ok
    }
}
