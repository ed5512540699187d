//! Provisioned resource handles

use crate::kind::ResourceKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of creating or looking up a resource
///
/// `outputs` is the provider's view of the resource (for Kubernetes, the
/// object as returned by the API server). Output chains dereference into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedResource {
    pub kind: ResourceKind,

    /// Platform-facing name the resource was provisioned under
    pub qualified_name: String,

    /// Provider-specific resource ID
    pub id: String,

    /// Resource outputs
    pub outputs: serde_json::Value,

    pub provisioned_at: DateTime<Utc>,
}

impl ProvisionedResource {
    pub fn new(
        kind: ResourceKind,
        qualified_name: impl Into<String>,
        id: impl Into<String>,
        outputs: serde_json::Value,
    ) -> Self {
        Self {
            kind,
            qualified_name: qualified_name.into(),
            id: id.into(),
            outputs,
            provisioned_at: Utc::now(),
        }
    }

    /// Follow an output chain, one field per segment
    ///
    /// Returns `None` as soon as a segment is missing or null.
    pub fn output<S: AsRef<str>>(&self, chain: &[S]) -> Option<&serde_json::Value> {
        let mut current = &self.outputs;
        for segment in chain {
            current = current.get(segment.as_ref())?;
            if current.is_null() {
                return None;
            }
        }
        Some(current)
    }

    /// Follow an output chain and render the value as a string
    ///
    /// Strings are returned verbatim, other values as compact JSON.
    pub fn output_string<S: AsRef<str>>(&self, chain: &[S]) -> Option<String> {
        self.output(chain).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
