//! Resource kinds

use serde::{Deserialize, Serialize};

/// The closed set of resource kinds Stratum provisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Namespace,
    Secret,
    ConfigMap,
}

impl ResourceKind {
    /// Kinds are built in this order within an environment. Namespaces come
    /// first because secrets and config maps reference their outputs.
    pub const BUILD_ORDER: [ResourceKind; 3] = [
        ResourceKind::Namespace,
        ResourceKind::Secret,
        ResourceKind::ConfigMap,
    ];

    pub fn api_version(&self) -> &'static str {
        "v1"
    }

    /// Platform kind name as used in manifests
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Secret => "Secret",
            ResourceKind::ConfigMap => "ConfigMap",
        }
    }

    /// Whether resources of this kind live inside a namespace
    pub fn is_namespaced(&self) -> bool {
        !matches!(self, ResourceKind::Namespace)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Namespace => write!(f, "namespace"),
            ResourceKind::Secret => write!(f, "secret"),
            ResourceKind::ConfigMap => write!(f, "configmap"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_order_starts_with_namespaces() {
        assert_eq!(ResourceKind::BUILD_ORDER[0], ResourceKind::Namespace);
        assert_eq!(ResourceKind::BUILD_ORDER.len(), 3);
    }

    #[test]
    fn test_namespaced() {
        assert!(!ResourceKind::Namespace.is_namespaced());
        assert!(ResourceKind::Secret.is_namespaced());
        assert!(ResourceKind::ConfigMap.is_namespaced());
    }

    #[test]
    fn test_display_and_kind() {
        assert_eq!(ResourceKind::ConfigMap.to_string(), "configmap");
        assert_eq!(ResourceKind::ConfigMap.kind(), "ConfigMap");
    }
}
