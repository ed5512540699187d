//! Kubernetes resource declarations
//!
//! Argument shapes mirror the platform's core/v1 argument types. Field names
//! are snake_case in the configuration file.

use crate::args::ArgumentTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declared resource: logical name, optional external id to find, optional
/// arguments to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDeclaration<A> {
    /// Logical name, unique within one environment across all kinds
    pub name: String,

    /// Informational API version (e.g. "v1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Informational kind (e.g. "Secret")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// External id of an existing resource to look up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Arguments used to create the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<A>,
}

impl<A> ResourceDeclaration<A> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_version: None,
            kind: None,
            id: None,
            args: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_args(mut self, args: A) -> Self {
        self.args = Some(args);
        self
    }
}

pub type NamespaceDeclaration = ResourceDeclaration<NamespaceArgs>;
pub type SecretDeclaration = ResourceDeclaration<SecretArgs>;
pub type ConfigMapDeclaration = ResourceDeclaration<ConfigMapArgs>;

/// Kubernetes resources declared for one environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubernetesSpec {
    #[serde(default)]
    pub namespaces: Vec<NamespaceDeclaration>,

    #[serde(default)]
    pub secrets: Vec<SecretDeclaration>,

    #[serde(default)]
    pub configmaps: Vec<ConfigMapDeclaration>,
}

impl KubernetesSpec {
    /// Total number of declarations across all kinds
    pub fn len(&self) -> usize {
        self.namespaces.len() + self.secrets.len() + self.configmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Object metadata arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetaArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl ArgumentTree for ObjectMetaArgs {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        self.name.visit_strings(leaves);
        self.namespace.visit_strings(leaves);
        self.labels.visit_strings(leaves);
        self.annotations.visit_strings(leaves);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceSpecArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalizers: Option<Vec<String>>,
}

impl ArgumentTree for NamespaceSpecArgs {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        self.finalizers.visit_strings(leaves);
    }
}

/// Namespace creation arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMetaArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<NamespaceSpecArgs>,
}

impl ArgumentTree for NamespaceArgs {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        self.metadata.visit_strings(leaves);
        self.spec.visit_strings(leaves);
    }
}

/// Secret creation arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMetaArgs>,

    /// Base64-encoded values, passed through as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,

    /// Plain-text values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_data: Option<BTreeMap<String, String>>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
}

impl ArgumentTree for SecretArgs {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        self.metadata.visit_strings(leaves);
        self.data.visit_strings(leaves);
        self.string_data.visit_strings(leaves);
        self.type_.visit_strings(leaves);
        self.immutable.visit_strings(leaves);
    }
}

/// ConfigMap creation arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigMapArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMetaArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_data: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
}

impl ArgumentTree for ConfigMapArgs {
    fn visit_strings<'a>(&'a mut self, leaves: &mut Vec<&'a mut String>) {
        self.metadata.visit_strings(leaves);
        self.data.visit_strings(leaves);
        self.binary_data.visit_strings(leaves);
        self.immutable.visit_strings(leaves);
    }
}
