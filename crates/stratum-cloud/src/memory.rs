//! In-memory provider
//!
//! Keeps resources in process memory. Backs `stratum build --dry-run` and
//! the engine's tests: existing resources can be seeded for `find`, every
//! call is recorded, and creates can be rejected per qualified name.

use crate::error::{CloudError, Result};
use crate::handle::ProvisionedResource;
use crate::kind::ResourceKind;
use crate::manifest::Manifest;
use crate::provider::ProviderClient;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// A call received by [`MemoryProvider`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    Find {
        kind: ResourceKind,
        qualified_name: String,
        external_id: String,
    },
    Create {
        kind: ResourceKind,
        qualified_name: String,
        manifest: Manifest,
    },
}

#[derive(Debug, Default)]
struct MemoryState {
    /// (kind, id) -> resource
    resources: HashMap<(ResourceKind, String), ProvisionedResource>,
    calls: Vec<ProviderCall>,
    rejected: HashSet<String>,
    next_uid: u64,
}

/// Provider that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryProvider {
    state: Mutex<MemoryState>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing resource that `find` will return for `id`
    pub fn with_existing(
        self,
        kind: ResourceKind,
        id: impl Into<String>,
        outputs: serde_json::Value,
    ) -> Self {
        let id = id.into();
        self.lock().resources.insert(
            (kind, id.clone()),
            ProvisionedResource::new(kind, id.clone(), id, outputs),
        );
        self
    }

    /// Make every create for `qualified_name` fail with [`CloudError::Rejected`]
    pub fn reject(self, qualified_name: impl Into<String>) -> Self {
        self.lock().rejected.insert(qualified_name.into());
        self
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.lock().calls.clone()
    }

    /// Manifests of every create call, in order
    pub fn created(&self) -> Vec<Manifest> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ProviderCall::Create { manifest, .. } => Some(manifest.clone()),
                ProviderCall::Find { .. } => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// `namespace/name` for namespaced kinds, `name` otherwise
fn resource_id(kind: ResourceKind, manifest: &Manifest) -> String {
    match manifest.namespace() {
        Some(namespace) if kind.is_namespaced() => {
            format!("{}/{}", namespace, manifest.metadata.name)
        }
        _ => manifest.metadata.name.clone(),
    }
}

#[async_trait]
impl ProviderClient for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find(
        &self,
        kind: ResourceKind,
        qualified_name: &str,
        external_id: &str,
    ) -> Result<ProvisionedResource> {
        let mut state = self.lock();
        state.calls.push(ProviderCall::Find {
            kind,
            qualified_name: qualified_name.to_string(),
            external_id: external_id.to_string(),
        });

        state
            .resources
            .get(&(kind, external_id.to_string()))
            .cloned()
            .ok_or_else(|| CloudError::ResourceNotFound(format!("{} {}", kind, external_id)))
    }

    async fn create(
        &self,
        kind: ResourceKind,
        qualified_name: &str,
        manifest: &Manifest,
    ) -> Result<ProvisionedResource> {
        let mut state = self.lock();
        state.calls.push(ProviderCall::Create {
            kind,
            qualified_name: qualified_name.to_string(),
            manifest: manifest.clone(),
        });

        if state.rejected.contains(qualified_name) {
            return Err(CloudError::Rejected(format!(
                "{} {} rejected by provider",
                kind, qualified_name
            )));
        }

        let id = resource_id(kind, manifest);
        if state.resources.contains_key(&(kind, id.clone())) {
            return Err(CloudError::Rejected(format!("{} {} already exists", kind, id)));
        }

        state.next_uid += 1;
        let mut outputs = serde_json::to_value(manifest)?;
        outputs["metadata"]["uid"] = serde_json::json!(format!("uid-{:06}", state.next_uid));

        let resource = ProvisionedResource::new(kind, qualified_name, id.clone(), outputs);
        state.resources.insert((kind, id), resource.clone());
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::KindArgs;
    use serde_json::json;
    use std::collections::BTreeMap;
    use stratum_core::SecretArgs;

    fn secret_manifest(name: &str) -> Manifest {
        SecretArgs::default().into_manifest(name, &BTreeMap::new())
    }

    #[tokio::test]
    async fn test_find_seeded() {
        let provider = MemoryProvider::new().with_existing(
            ResourceKind::Namespace,
            "kube-system",
            json!({ "metadata": { "name": "kube-system" } }),
        );

        let found = provider
            .find(ResourceKind::Namespace, "t-s-e-system", "kube-system")
            .await
            .unwrap();
        assert_eq!(found.id, "kube-system");
        assert_eq!(
            found.output_string(&["metadata", "name"]).as_deref(),
            Some("kube-system")
        );
    }

    #[tokio::test]
    async fn test_find_missing() {
        let provider = MemoryProvider::new();
        let result = provider.find(ResourceKind::Secret, "q", "default/none").await;
        assert!(matches!(result, Err(CloudError::ResourceNotFound(_))));
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_uid() {
        let provider = MemoryProvider::new();
        let manifest = secret_manifest("t-s-e-db");

        let created = provider
            .create(ResourceKind::Secret, "t-s-e-db", &manifest)
            .await
            .unwrap();

        assert_eq!(created.id, "default/t-s-e-db");
        assert_eq!(
            created.output_string(&["metadata", "uid"]).as_deref(),
            Some("uid-000001")
        );
        assert_eq!(provider.created(), vec![manifest]);
    }

    #[tokio::test]
    async fn test_created_resource_can_be_found() {
        let provider = MemoryProvider::new();
        let manifest = secret_manifest("t-s-e-db");
        provider
            .create(ResourceKind::Secret, "t-s-e-db", &manifest)
            .await
            .unwrap();

        let found = provider
            .find(ResourceKind::Secret, "t-s-e-db", "default/t-s-e-db")
            .await;
        assert!(found.is_ok());
    }

    #[tokio::test]
    async fn test_create_conflict_is_rejected() {
        let provider = MemoryProvider::new();
        let manifest = secret_manifest("t-s-e-db");
        provider
            .create(ResourceKind::Secret, "t-s-e-db", &manifest)
            .await
            .unwrap();

        let again = provider
            .create(ResourceKind::Secret, "t-s-e-db", &manifest)
            .await;
        assert!(matches!(again, Err(CloudError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_reject() {
        let provider = MemoryProvider::new().reject("t-s-e-db");
        let result = provider
            .create(ResourceKind::Secret, "t-s-e-db", &secret_manifest("t-s-e-db"))
            .await;
        assert!(matches!(result, Err(CloudError::Rejected(_))));
    }
}
