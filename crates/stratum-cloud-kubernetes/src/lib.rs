//! Kubernetes provider for Stratum
//!
//! This crate implements the `ProviderClient` trait for Kubernetes by
//! driving the `kubectl` CLI.
//!
//! # Requirements
//!
//! - `kubectl` must be installed
//! - Cluster access is taken from the kubeconfig; `--context` and
//!   `--kubeconfig` can be set per provider
//!
//! # Example
//!
//! ```ignore
//! use stratum_cloud_kubernetes::{Kubectl, KubernetesProvider};
//!
//! let provider = KubernetesProvider::new(Kubectl::new().with_context("kind-dev"));
//! provider.check().await?;
//! ```

pub mod error;
pub mod kubectl;
pub mod provider;

pub use error::{KubernetesError, Result};
pub use kubectl::Kubectl;
pub use provider::KubernetesProvider;
