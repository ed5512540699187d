//! Provider client contract

use crate::error::Result;
use crate::handle::ProvisionedResource;
use crate::kind::ResourceKind;
use crate::manifest::Manifest;
use async_trait::async_trait;

/// Remote platform client
///
/// Provider clients (Kubernetes via kubectl, in-memory, ...) implement this
/// trait. The engine only ever finds or creates; it never updates or
/// deletes.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Returns the provider name (e.g., "kubernetes", "memory")
    fn name(&self) -> &str;

    /// Look up an existing resource by external id
    ///
    /// Fails with [`CloudError::ResourceNotFound`](crate::CloudError::ResourceNotFound)
    /// when no such resource exists.
    async fn find(
        &self,
        kind: ResourceKind,
        qualified_name: &str,
        external_id: &str,
    ) -> Result<ProvisionedResource>;

    /// Create a resource from its native manifest
    ///
    /// Fails with [`CloudError::Rejected`](crate::CloudError::Rejected) when
    /// the platform refuses the request.
    async fn create(
        &self,
        kind: ResourceKind,
        qualified_name: &str,
        manifest: &Manifest,
    ) -> Result<ProvisionedResource>;
}
