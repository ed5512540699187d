//! Stratum core
//!
//! Declarative schema consumed by the Stratum provisioning engine:
//! organizational units (team, service, environment), the per-environment
//! Kubernetes resource declarations, and the argument trees handed to
//! resource creation.
//!
//! Argument trees implement [`ArgumentTree`], a typed visitor over every
//! string leaf, so reference resolution never has to inspect values at
//! runtime.

pub mod args;
pub mod error;
pub mod loader;
pub mod model;

pub use args::ArgumentTree;
pub use error::{CoreError, Result};
pub use loader::{load_config, parse_config};
pub use model::*;
