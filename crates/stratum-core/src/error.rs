use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read configuration: {path}\nReason: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate {kind} name '{name}' in environment '{environment}'")]
    DuplicateName {
        kind: String,
        name: String,
        environment: String,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
