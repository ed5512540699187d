//! Reference resolution
//!
//! Rewrites every string leaf of an argument tree that holds a reference
//! expression, in place, before the tree is handed to resource creation.
//!
//! - `Resource <name>, <chain>`: replaced by the cached resource's output. A
//!   missing resource or a chain that runs into no value leaves the literal
//!   in place.
//! - `Secret <name>`: replaced by the secret store's value. A missing secret
//!   aborts resolution.
//!
//! Resolution is a single pass. A resolved value that itself looks like a
//! reference is not resolved again, and reference cycles are not detected:
//! whichever side is built first simply sees the other as absent.

use crate::context::BuildContext;
use crate::error::Result;
use crate::reference::ReferenceExpression;
use crate::secrets::SecretStore;
use stratum_core::ArgumentTree;
use tracing::debug;

/// Counts of what a resolution pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    /// `Resource` references replaced by an output value
    pub resources_resolved: usize,
    /// `Resource` references left as literals
    pub resources_unresolved: usize,
    /// `Secret` references replaced by the store's value
    pub secrets_resolved: usize,
}

impl ResolutionSummary {
    pub fn total_resolved(&self) -> usize {
        self.resources_resolved + self.secrets_resolved
    }
}

/// Resolves references against a build context and a secret store
pub struct Resolver<'a> {
    context: &'a BuildContext,
    secrets: &'a dyn SecretStore,
}

impl<'a> Resolver<'a> {
    pub fn new(context: &'a BuildContext, secrets: &'a dyn SecretStore) -> Self {
        Self { context, secrets }
    }

    /// Resolve every reference in `tree`, depth first
    pub async fn resolve<T: ArgumentTree>(&self, tree: &mut T) -> Result<ResolutionSummary> {
        let mut summary = ResolutionSummary::default();

        let mut leaves = Vec::new();
        tree.visit_strings(&mut leaves);

        for leaf in leaves {
            let Some(expression) = ReferenceExpression::parse(leaf) else {
                continue;
            };

            match expression {
                ReferenceExpression::Resource { name, output_chain } => {
                    match self.resolve_output(&name, &output_chain) {
                        Some(value) => {
                            debug!(reference = %leaf, "Resolved resource reference");
                            *leaf = value;
                            summary.resources_resolved += 1;
                        }
                        None => {
                            debug!(reference = %leaf, "Resource reference left unresolved");
                            summary.resources_unresolved += 1;
                        }
                    }
                }
                ReferenceExpression::Secret { name } => {
                    *leaf = self.secrets.require_secret(&name).await?;
                    debug!(secret = %name, "Resolved secret reference");
                    summary.secrets_resolved += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Output of a cached resource, or `None` if the resource is absent or
    /// the chain runs into no value
    fn resolve_output(&self, name: &str, output_chain: &[String]) -> Option<String> {
        self.context.get(name)?.output_string(output_chain)
    }
}
