//! Kubernetes provider error types

use stratum_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubernetesError {
    #[error("kubectl not found. Please install: https://kubernetes.io/docs/tasks/tools/")]
    KubectlNotFound,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("kubectl command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid resource id: {0}")]
    InvalidId(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KubernetesError>;

impl From<KubernetesError> for CloudError {
    fn from(err: KubernetesError) -> Self {
        match err {
            KubernetesError::NotFound(msg) => CloudError::ResourceNotFound(msg),
            KubernetesError::InvalidId(msg) => CloudError::ResourceNotFound(msg),
            KubernetesError::KubectlNotFound => {
                CloudError::CommandFailed("kubectl not found".to_string())
            }
            KubernetesError::CommandFailed(msg) => CloudError::CommandFailed(msg),
            KubernetesError::JsonError(e) => CloudError::Json(e),
            KubernetesError::IoError(e) => CloudError::Io(e),
        }
    }
}
