use std::sync::Arc;

use auth::PasswordError;
use auth::PasswordHasher;

/// Async front for the password hasher.
///
/// Argon2 deliberately burns CPU for tens of milliseconds; both operations run
/// on Tokio's blocking pool so request workers keep serving.
#[derive(Clone)]
pub struct Credentials {
    hasher: Arc<PasswordHasher>,
}

impl Credentials {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            hasher: Arc::new(hasher),
        }
    }

    /// Hash a plaintext password.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing failed or the blocking task was lost
    pub async fn hash(&self, password: String) -> Result<String, PasswordError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed or the blocking task was lost
    pub async fn verify(&self, password: String, hash: String) -> Result<bool, PasswordError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))?
    }
}
