//! Kubernetes provider implementation

use crate::error::KubernetesError;
use crate::kubectl::Kubectl;
use async_trait::async_trait;
use stratum_cloud::manifest::DEFAULT_NAMESPACE;
use stratum_cloud::{CloudError, Manifest, ProviderClient, ProvisionedResource, ResourceKind};
use tracing::{debug, instrument};

/// Kubernetes provider
///
/// External ids are `name` for namespaces and `namespace/name` for
/// namespaced kinds. A namespaced id without a namespace refers to the
/// `default` namespace.
pub struct KubernetesProvider {
    kubectl: Kubectl,
}

impl KubernetesProvider {
    pub fn new(kubectl: Kubectl) -> Self {
        Self { kubectl }
    }

    /// Check that kubectl is installed
    pub async fn check(&self) -> stratum_cloud::Result<()> {
        Ok(self.kubectl.check_available().await?)
    }
}

impl Default for KubernetesProvider {
    fn default() -> Self {
        Self::new(Kubectl::new())
    }
}

/// Split an external id into (namespace, name)
fn parse_external_id(
    kind: ResourceKind,
    external_id: &str,
) -> Result<(Option<String>, String), KubernetesError> {
    let invalid = || KubernetesError::InvalidId(format!("{} {:?}", kind, external_id));

    let (namespace, name) = match external_id.split_once('/') {
        Some((namespace, name)) if kind.is_namespaced() => (Some(namespace), name),
        Some(_) => return Err(invalid()),
        None if kind.is_namespaced() => (Some(DEFAULT_NAMESPACE), external_id),
        None => (None, external_id),
    };

    if name.is_empty() || namespace.is_some_and(str::is_empty) || name.contains('/') {
        return Err(invalid());
    }
    Ok((namespace.map(str::to_string), name.to_string()))
}

/// Id of an object as returned by the API server
fn object_id(kind: ResourceKind, object: &serde_json::Value, fallback: &str) -> String {
    let metadata = &object["metadata"];
    let name = metadata["name"].as_str().unwrap_or(fallback);
    match metadata["namespace"].as_str() {
        Some(namespace) if kind.is_namespaced() => format!("{}/{}", namespace, name),
        _ => name.to_string(),
    }
}

#[async_trait]
impl ProviderClient for KubernetesProvider {
    fn name(&self) -> &str {
        "kubernetes"
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn find(
        &self,
        kind: ResourceKind,
        qualified_name: &str,
        external_id: &str,
    ) -> stratum_cloud::Result<ProvisionedResource> {
        let (namespace, name) = parse_external_id(kind, external_id)?;
        let object = self
            .kubectl
            .get(&kind.to_string(), &name, namespace.as_deref())
            .await?;

        let id = object_id(kind, &object, &name);
        debug!(id = %id, "Found object");
        Ok(ProvisionedResource::new(kind, qualified_name, id, object))
    }

    #[instrument(skip(self, manifest), fields(kind = %kind))]
    async fn create(
        &self,
        kind: ResourceKind,
        qualified_name: &str,
        manifest: &Manifest,
    ) -> stratum_cloud::Result<ProvisionedResource> {
        let request = serde_json::to_value(manifest)?;
        let object = self.kubectl.create(&request).await.map_err(|e| match e {
            // The API server refused the object (conflict, invalid, missing namespace)
            KubernetesError::CommandFailed(msg) | KubernetesError::NotFound(msg) => {
                CloudError::Rejected(msg)
            }
            other => other.into(),
        })?;

        let id = object_id(kind, &object, &manifest.metadata.name);
        debug!(id = %id, "Created object");
        Ok(ProvisionedResource::new(kind, qualified_name, id, object))
    }
}
