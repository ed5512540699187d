//! Resource lifecycle
//!
//! Find-or-create protocol shared by every resource kind:
//!
//! ```text
//! Unbuilt ──find ok──────────────► Found ──┐
//!    │    ──find failed──► FindFailed      ├──► Cached
//!    └──── resolve ──► create ──► Created ─┘
//! ```
//!
//! A failed find is logged and ends the lifecycle without caching anything,
//! even when the declaration also carries creation arguments. Creation
//! failures and missing secrets are fatal and propagate to the caller.

use crate::context::BuildContext;
use crate::error::Result;
use crate::handle::ProvisionedResource;
use crate::manifest::KindArgs;
use crate::provider::ProviderClient;
use crate::resolver::Resolver;
use crate::secrets::SecretStore;
use tracing::{debug, info, instrument, warn};

/// Terminal state of one lifecycle run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Looked up by external id and cached
    Found,
    /// Created (possibly after a successful find) and cached
    Created,
    /// Lookup failed; nothing cached
    FindFailed,
    /// Neither an external id nor arguments were declared; nothing cached
    Skipped,
}

impl LifecycleState {
    /// Whether the resource ended up in the cache
    pub fn is_cached(&self) -> bool {
        matches!(self, LifecycleState::Found | LifecycleState::Created)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Found => write!(f, "found"),
            LifecycleState::Created => write!(f, "created"),
            LifecycleState::FindFailed => write!(f, "find-failed"),
            LifecycleState::Skipped => write!(f, "skipped"),
        }
    }
}

/// Lifecycle of one declared resource
pub struct ResourceLifecycle<'a> {
    name: &'a str,
    context: &'a mut BuildContext,
    provider: &'a dyn ProviderClient,
    secrets: &'a dyn SecretStore,
}

impl<'a> ResourceLifecycle<'a> {
    pub fn new(
        name: &'a str,
        context: &'a mut BuildContext,
        provider: &'a dyn ProviderClient,
        secrets: &'a dyn SecretStore,
    ) -> Self {
        Self {
            name,
            context,
            provider,
            secrets,
        }
    }

    /// Find and/or create the resource, then cache the last result
    #[instrument(
        name = "lifecycle",
        skip_all,
        fields(kind = %A::KIND, name = %self.name, provider = %self.provider.name())
    )]
    pub async fn build<A: KindArgs>(
        self,
        external_id: Option<&str>,
        args: Option<A>,
    ) -> Result<LifecycleState> {
        let mut result: Option<(ProvisionedResource, LifecycleState)> = None;

        if let Some(external_id) = external_id {
            match self.find::<A>(external_id).await {
                Ok(resource) => {
                    info!(id = %resource.id, "Found existing resource");
                    result = Some((resource, LifecycleState::Found));
                }
                Err(e) => {
                    warn!(
                        external_id = %external_id,
                        create_skipped = args.is_some(),
                        "Failed to find existing {} with id {}: {}",
                        A::KIND,
                        external_id,
                        e
                    );
                    return Ok(LifecycleState::FindFailed);
                }
            }
        }

        if let Some(mut args) = args {
            let summary = Resolver::new(self.context, self.secrets)
                .resolve(&mut args)
                .await?;
            debug!(
                resolved = summary.total_resolved(),
                unresolved = summary.resources_unresolved,
                "Resolved references"
            );

            let resource = self.create(args).await?;
            info!(id = %resource.id, "Created resource");
            result = Some((resource, LifecycleState::Created));
        }

        match result {
            Some((resource, state)) => {
                self.context.put(self.name, resource);
                Ok(state)
            }
            None => {
                warn!("Declaration has neither an id nor args, skipping");
                Ok(LifecycleState::Skipped)
            }
        }
    }

    async fn find<A: KindArgs>(&self, external_id: &str) -> Result<ProvisionedResource> {
        let qualified_name = self.context.qualified_name(self.name);
        self.provider
            .find(A::KIND, &qualified_name, external_id)
            .await
    }

    async fn create<A: KindArgs>(&self, args: A) -> Result<ProvisionedResource> {
        let qualified_name = self.context.qualified_name(self.name);
        let manifest = args.into_manifest(&qualified_name, &self.context.labels());
        self.provider
            .create(A::KIND, &qualified_name, &manifest)
            .await
    }
}
