//! Configuration model
//!
//! Organizational units and the Kubernetes resource declarations they carry.

mod kubernetes;
mod organization;

// Re-exports
pub use kubernetes::*;
pub use organization::*;
