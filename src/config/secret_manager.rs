use std::fmt;

use crate::config::{
    EnvironmentProvider, SecretConfig, SecretError, SecretType, SystemEnvironment,
};

pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const PASSWORD_PEPPER_VAR: &str = "PASSWORD_PEPPER";

/// Centralized manager for application secrets
///
/// Loaded once at startup. Missing or short secrets abort startup.
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
}

impl SecretManager {
    /// Load secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    /// Load and validate all secrets from the given environment
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env, &Self::jwt_config())?;
        let password_pepper = Self::load_secret(env, &Self::pepper_config())?;

        Ok(Self {
            jwt_secret,
            password_pepper,
        })
    }

    fn jwt_config() -> SecretConfig {
        SecretConfig::new(SecretType::env_var(JWT_SECRET_VAR))
            .required(true)
            .min_length(32)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::new(SecretType::env_var(PASSWORD_PEPPER_VAR))
            .required(false)
            .min_length(16)
    }

    /// HMAC key for access tokens
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Argon2 secret parameter; empty when no pepper is configured
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    pub(crate) fn load_secret(
        env: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let name = config.secret_type.name();

        let value = match env.get_var(name) {
            Some(v) => v,
            None if !config.required => return Ok(String::new()),
            None => return Err(SecretError::missing(name)),
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::invalid_length(name, min_len, value.len()));
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SecretManager {{ pepper_configured: {} }}",
            !self.password_pepper.is_empty()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWT: &str = "this-is-a-valid-jwt-secret-with-32-characters";
    const PEPPER: &str = "valid-pepper-16ch";

    #[test]
    fn test_loads_both_secrets() {
        let env = MockEnvironment::empty()
            .with_vars(&[(JWT_SECRET_VAR, JWT), (PASSWORD_PEPPER_VAR, PEPPER)]);

        let manager = SecretManager::from_env_provider(&env).unwrap();

        assert_eq!(manager.jwt_secret(), JWT);
        assert_eq!(manager.password_pepper(), PEPPER);
    }

    #[test]
    fn test_pepper_is_optional() {
        let env = MockEnvironment::empty().with_var(JWT_SECRET_VAR, JWT);

        let manager = SecretManager::from_env_provider(&env).unwrap();

        assert_eq!(manager.password_pepper(), "");
    }

    #[test]
    fn test_error_when_jwt_secret_missing() {
        let env = MockEnvironment::empty().with_var(PASSWORD_PEPPER_VAR, PEPPER);

        match SecretManager::from_env_provider(&env).unwrap_err() {
            SecretError::Missing { secret_name } => assert_eq!(secret_name, "JWT_SECRET"),
            other => panic!("Expected Missing error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_when_jwt_secret_too_short() {
        let env = MockEnvironment::empty().with_var(JWT_SECRET_VAR, "short-secret");

        match SecretManager::from_env_provider(&env).unwrap_err() {
            SecretError::InvalidLength {
                secret_name,
                expected,
                actual,
            } => {
                assert_eq!(secret_name, "JWT_SECRET");
                assert_eq!(expected, 32);
                assert_eq!(actual, 12);
            }
            other => panic!("Expected InvalidLength error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_when_pepper_present_but_short() {
        let env = MockEnvironment::empty()
            .with_vars(&[(JWT_SECRET_VAR, JWT), (PASSWORD_PEPPER_VAR, "short")]);

        match SecretManager::from_env_provider(&env).unwrap_err() {
            SecretError::InvalidLength {
                secret_name,
                expected,
                actual,
            } => {
                assert_eq!(secret_name, "PASSWORD_PEPPER");
                assert_eq!(expected, 16);
                assert_eq!(actual, 5);
            }
            other => panic!("Expected InvalidLength error, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_and_display_do_not_expose_secrets() {
        let env = MockEnvironment::empty()
            .with_vars(&[(JWT_SECRET_VAR, JWT), (PASSWORD_PEPPER_VAR, PEPPER)]);
        let manager = SecretManager::from_env_provider(&env).unwrap();

        let debug_output = format!("{:?}", manager);
        let display_output = format!("{}", manager);

        assert!(debug_output.contains("<redacted>"));
        for output in [debug_output, display_output] {
            assert!(!output.contains(JWT));
            assert!(!output.contains(PEPPER));
        }
    }
}
