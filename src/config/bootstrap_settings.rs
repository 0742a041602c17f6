use std::fmt;

use crate::config::{ConfigError, EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://bank.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
}

impl BootstrapSettings {
    /// Load bootstrap settings from the given environment, applying defaults
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let database_url = Self::non_empty(env, "DATABASE_URL", DEFAULT_DATABASE_URL)?;
        let server_host = Self::non_empty(env, "HOST", DEFAULT_HOST)?;

        let server_port = match env.get_var("PORT") {
            Some(value) => Self::parse_port(&value)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    fn non_empty(
        env: &dyn EnvironmentProvider,
        name: &str,
        default: &str,
    ) -> Result<String, ConfigError> {
        let value = env.get_var(name).unwrap_or_else(|| default.to_string());
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(name, "must not be empty"));
        }
        Ok(value)
    }

    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        let port: u16 = value
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::parse("PORT", e.to_string()))?;
        if port == 0 {
            return Err(ConfigError::invalid("PORT", "must be between 1 and 65535"));
        }
        Ok(port)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}
