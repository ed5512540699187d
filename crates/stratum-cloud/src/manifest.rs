//! Provider-native resource shapes
//!
//! Each kind maps its argument tree into a [`Manifest`], injecting the
//! qualified name, the context labels and, for namespaced kinds, the target
//! namespace.

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stratum_core::{ArgumentTree, ConfigMapArgs, NamespaceArgs, ObjectMetaArgs, SecretArgs};

/// Namespace used when a namespaced resource does not declare one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Object metadata as sent to the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// A resource creation request in the platform's own shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub api_version: String,

    pub kind: String,

    pub metadata: ObjectMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_data: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_data: Option<BTreeMap<String, String>>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<serde_json::Value>,
}

impl Manifest {
    fn new(kind: ResourceKind, metadata: ObjectMeta) -> Self {
        Self {
            api_version: kind.api_version().to_string(),
            kind: kind.kind().to_string(),
            metadata,
            data: None,
            string_data: None,
            binary_data: None,
            type_: None,
            immutable: None,
            spec: None,
        }
    }

    /// Namespace the resource will live in, for namespaced kinds
    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }
}

/// Per-kind creation arguments
///
/// Implemented by the argument tree of every resource kind; ties the tree to
/// its kind and maps it into the provider's native shape.
pub trait KindArgs: ArgumentTree + Send {
    const KIND: ResourceKind;

    fn into_manifest(self, qualified_name: &str, labels: &BTreeMap<String, String>) -> Manifest;
}

/// Build metadata from declared metadata, overriding the name and, for
/// namespaced kinds, defaulting the namespace
fn object_meta(
    kind: ResourceKind,
    qualified_name: &str,
    declared: Option<ObjectMetaArgs>,
    labels: &BTreeMap<String, String>,
) -> ObjectMeta {
    let declared = declared.unwrap_or_default();

    let mut merged = labels.clone();
    merged.extend(declared.labels.unwrap_or_default());

    let namespace = kind.is_namespaced().then(|| {
        declared
            .namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    });

    ObjectMeta {
        name: qualified_name.to_string(),
        namespace,
        labels: merged,
        annotations: declared.annotations.unwrap_or_default(),
    }
}

impl KindArgs for NamespaceArgs {
    const KIND: ResourceKind = ResourceKind::Namespace;

    fn into_manifest(self, qualified_name: &str, labels: &BTreeMap<String, String>) -> Manifest {
        let metadata = object_meta(Self::KIND, qualified_name, self.metadata, labels);
        let mut manifest = Manifest::new(Self::KIND, metadata);
        manifest.spec = self
            .spec
            .and_then(|spec| spec.finalizers)
            .map(|finalizers| serde_json::json!({ "finalizers": finalizers }));
        manifest
    }
}

impl KindArgs for SecretArgs {
    const KIND: ResourceKind = ResourceKind::Secret;

    fn into_manifest(self, qualified_name: &str, labels: &BTreeMap<String, String>) -> Manifest {
        let metadata = object_meta(Self::KIND, qualified_name, self.metadata, labels);
        let mut manifest = Manifest::new(Self::KIND, metadata);
        manifest.data = self.data;
        manifest.string_data = self.string_data;
        manifest.type_ = self.type_;
        manifest.immutable = self.immutable;
        manifest
    }
}

impl KindArgs for ConfigMapArgs {
    const KIND: ResourceKind = ResourceKind::ConfigMap;

    fn into_manifest(self, qualified_name: &str, labels: &BTreeMap<String, String>) -> Manifest {
        let metadata = object_meta(Self::KIND, qualified_name, self.metadata, labels);
        let mut manifest = Manifest::new(Self::KIND, metadata);
        manifest.data = self.data;
        manifest.binary_data = self.binary_data;
        manifest.immutable = self.immutable;
        manifest
    }
}
