/// Where a secret is loaded from
#[derive(Debug, Clone)]
pub enum SecretType {
    /// Environment variable, looked up through the `EnvironmentProvider`
    EnvVar { name: String },
}

impl SecretType {
    pub fn env_var(name: &str) -> Self {
        Self::EnvVar {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SecretType::EnvVar { name } => name,
        }
    }
}

/// Loading rules for a single secret
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub secret_type: SecretType,
    /// Absent optional secrets load as an empty string
    pub required: bool,
    pub min_length: Option<usize>,
}

impl SecretConfig {
    pub fn new(secret_type: SecretType) -> Self {
        Self {
            secret_type,
            required: true,
            min_length: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}
