#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid environment variable {0}: {1}")]
    Environment(String, String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for crate::DomainError {
    fn from(error: ConfigError) -> Self {
        crate::DomainError::ConfigError(error.to_string())
    }
}
