//! Resource builder
//!
//! Builds one environment's declared resources kind by kind in
//! [`ResourceKind::BUILD_ORDER`], and within a kind in declaration order,
//! strictly one after another. A reference to another resource resolves only
//! if that resource was built earlier in this order.

use crate::context::BuildContext;
use crate::error::Result;
use crate::kind::ResourceKind;
use crate::lifecycle::ResourceLifecycle;
use crate::manifest::KindArgs;
use crate::provider::ProviderClient;
use crate::secrets::SecretStore;
use stratum_core::{
    ConfigMapDeclaration, KubernetesSpec, NamespaceDeclaration, ResourceDeclaration,
    SecretDeclaration,
};
use tracing::{info, instrument};

/// Builds all declared resources of one environment
pub struct ResourceBuilder<'a> {
    context: &'a mut BuildContext,
    provider: &'a dyn ProviderClient,
    secrets: &'a dyn SecretStore,
}

impl<'a> ResourceBuilder<'a> {
    pub fn new(
        context: &'a mut BuildContext,
        provider: &'a dyn ProviderClient,
        secrets: &'a dyn SecretStore,
    ) -> Self {
        Self {
            context,
            provider,
            secrets,
        }
    }

    /// Build every declared resource; the first fatal error aborts the rest
    #[instrument(
        name = "build",
        skip_all,
        fields(
            team = %self.context.team(),
            service = %self.context.service(),
            environment = %self.context.environment()
        )
    )]
    pub async fn build(&mut self, spec: KubernetesSpec) -> Result<()> {
        let KubernetesSpec {
            mut namespaces,
            mut secrets,
            mut configmaps,
        } = spec;

        for kind in ResourceKind::BUILD_ORDER {
            match kind {
                ResourceKind::Namespace => {
                    self.build_namespaces(std::mem::take(&mut namespaces)).await?
                }
                ResourceKind::Secret => self.build_secrets(std::mem::take(&mut secrets)).await?,
                ResourceKind::ConfigMap => {
                    self.build_config_maps(std::mem::take(&mut configmaps))
                        .await?
                }
            }
        }

        info!(resources = self.context.len(), "Environment built");
        Ok(())
    }

    pub async fn build_namespaces(
        &mut self,
        declarations: Vec<NamespaceDeclaration>,
    ) -> Result<()> {
        self.build_all(declarations).await
    }

    pub async fn build_secrets(&mut self, declarations: Vec<SecretDeclaration>) -> Result<()> {
        self.build_all(declarations).await
    }

    pub async fn build_config_maps(
        &mut self,
        declarations: Vec<ConfigMapDeclaration>,
    ) -> Result<()> {
        self.build_all(declarations).await
    }

    async fn build_all<A: KindArgs>(
        &mut self,
        declarations: Vec<ResourceDeclaration<A>>,
    ) -> Result<()> {
        for declaration in declarations {
            ResourceLifecycle::new(
                &declaration.name,
                self.context,
                self.provider,
                self.secrets,
            )
            .build(declaration.id.as_deref(), declaration.args)
            .await?;
        }
        Ok(())
    }
}
