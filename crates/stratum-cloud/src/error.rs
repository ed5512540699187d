//! Provisioning error types

use thiserror::Error;

/// Errors raised by the lifecycle engine and provider clients
#[derive(Error, Debug)]
pub enum CloudError {
    /// Lookup by external id did not resolve. Recovered by the lifecycle.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The platform refused a create request. Fatal.
    #[error("Resource creation rejected: {0}")]
    Rejected(String),

    /// A `Secret <name>` reference named a secret the store cannot supply. Fatal.
    #[error("Secret not configured: {0}")]
    SecretNotConfigured(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
