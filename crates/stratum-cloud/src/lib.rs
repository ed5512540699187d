//! Stratum Cloud
//!
//! Resource lifecycle engine. Builds the resources declared for one
//! environment in a fixed kind order, resolving references between them
//! against a per-environment cache, and delegates every find and create to
//! a provider client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  Stratum CLI                     │
//! │              (stratum build/validate)            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                stratum-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ResourceBuilder ─► ResourceLifecycle    │   │
//! │  │        (find / resolve / create)          │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │   Resolver   │  │ BuildContext │            │
//! │  │ (references) │  │   (cache)    │            │
//! │  └──────────────┘  └──────────────┘            │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait ProviderClient / trait SecretStore │   │
//! │  └──────────────────────────────────────────┘   │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │  kubernetes   │ │    memory     │
//! │   (kubectl)   │ │  (dry-run)    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod handle;
pub mod kind;
pub mod lifecycle;
pub mod manifest;
pub mod memory;
pub mod provider;
pub mod reference;
pub mod resolver;
pub mod secrets;

// Re-exports
pub use builder::ResourceBuilder;
pub use context::BuildContext;
pub use error::{CloudError, Result};
pub use handle::ProvisionedResource;
pub use kind::ResourceKind;
pub use lifecycle::{LifecycleState, ResourceLifecycle};
pub use manifest::{KindArgs, Manifest, ObjectMeta};
pub use memory::{MemoryProvider, ProviderCall};
pub use provider::ProviderClient;
pub use reference::ReferenceExpression;
pub use resolver::{ResolutionSummary, Resolver};
pub use secrets::{ChainSecretStore, EnvSecretStore, MapSecretStore, SecretStore};
