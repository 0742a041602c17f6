use std::sync::Arc;

use crate::config::{BootstrapSettings, EnvironmentProvider, SecretManager, SystemEnvironment};

/// Startup failure while assembling configuration
#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Secret(#[from] crate::config::SecretError),
}

/// Everything read from the environment, loaded once at startup
#[derive(Debug)]
pub struct AppConfig {
    pub bootstrap: BootstrapSettings,
    pub secrets: Arc<SecretManager>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, AppConfigError> {
        Ok(Self {
            bootstrap: BootstrapSettings::from_env_provider(env)?,
            secrets: Arc::new(SecretManager::from_env_provider(env)?),
        })
    }
}
