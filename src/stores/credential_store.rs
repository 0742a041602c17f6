use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};

use crate::errors::InternalError;

/// Password hashing with Argon2id
///
/// The optional pepper is passed to Argon2 as its secret parameter, so hashes
/// only verify with the same pepper configured.
pub struct CredentialStore {
    password_pepper: String,
}

impl CredentialStore {
    /// Create a CredentialStore; an empty pepper disables the secret parameter
    pub fn new(password_pepper: impl Into<String>) -> Self {
        Self {
            password_pepper: password_pepper.into(),
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, argon2::Error> {
        if self.password_pepper.is_empty() {
            return Ok(Argon2::default());
        }

        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
    }

    /// Hash a password with a fresh random salt
    ///
    /// # Returns
    /// * `Ok(String)` - PHC-format hash string
    /// * `Err(InternalError)` - Argon2 could not be initialized or failed to hash
    pub fn hash(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let argon2 = self
            .argon2()
            .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))?;

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?;

        Ok(password_hash.to_string())
    }

    /// Check a password against a stored hash
    ///
    /// Returns false for a malformed hash instead of failing.
    pub fn verify(&self, password: &str, password_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                return false;
            }
        };

        let argon2 = match self.argon2() {
            Ok(argon2) => argon2,
            Err(e) => {
                tracing::error!("Argon2 initialization failed during verify: {}", e);
                return false;
            }
        };

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
