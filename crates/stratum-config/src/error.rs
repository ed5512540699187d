use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    ConfigDirNotFound,

    #[error(
        "Configuration file not found. Looked in:\n\
        - current directory: stratum.local.yaml, .stratum.local.yaml, stratum.yaml, .stratum.yaml\n\
        - ./.stratum/ directory\n\
        - ~/.config/stratum/stratum.yaml\n\
        A path can also be given with the STRATUM_CONFIG_PATH environment variable"
    )]
    ConfigFileNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
