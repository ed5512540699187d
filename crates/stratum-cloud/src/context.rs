//! Build context
//!
//! Identity of the environment being built plus the cache of resources
//! provisioned so far in this run. A fresh context is created per
//! environment and dropped once its resources are built.

use crate::handle::ProvisionedResource;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use stratum_core::EnvironmentTarget;

/// Label keys injected into every created resource
pub const TEAM_LABEL: &str = "stratum.io/team";
pub const SERVICE_LABEL: &str = "stratum.io/service";
pub const ENVIRONMENT_LABEL: &str = "stratum.io/environment";

/// Per-environment build state
#[derive(Debug, Clone)]
pub struct BuildContext {
    team: String,
    service: String,
    environment: String,
    location: Option<String>,
    project: Option<String>,
    labels: BTreeMap<String, String>,

    /// Logical name -> provisioned resource, in insertion order
    cache: IndexMap<String, ProvisionedResource>,
}

impl BuildContext {
    pub fn new(
        team: impl Into<String>,
        service: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            team: team.into(),
            service: service.into(),
            environment: environment.into(),
            location: None,
            project: None,
            labels: BTreeMap::new(),
            cache: IndexMap::new(),
        }
    }

    /// Context for an environment located in its team and service
    pub fn for_target(target: &EnvironmentTarget<'_>) -> Self {
        let mut context = Self::new(
            &target.team.name,
            &target.service.name,
            &target.environment.name,
        );
        context.location = target.environment.location.clone();
        context.project = target.environment.project.clone();
        context.labels = target.environment.labels.clone();
        context
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// `team-service-environment-name`
    pub fn qualified_name(&self, name: &str) -> String {
        format!("{}-{}-{}-{}", self.team, self.service, self.environment, name)
    }

    /// [`qualified_name`](Self::qualified_name) with every `-` removed, for
    /// targets that disallow punctuation in identifiers
    pub fn qualified_name_clean(&self, name: &str) -> String {
        self.qualified_name(name).replace('-', "")
    }

    /// Identity labels merged with the environment's labels
    ///
    /// Labels declared on the environment win over identity labels.
    pub fn labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::from([
            (TEAM_LABEL.to_string(), self.team.clone()),
            (SERVICE_LABEL.to_string(), self.service.clone()),
            (ENVIRONMENT_LABEL.to_string(), self.environment.clone()),
        ]);
        labels.extend(self.labels.clone());
        labels
    }

    /// Store a resource under its logical name, replacing any previous entry
    pub fn put(&mut self, name: impl Into<String>, resource: ProvisionedResource) {
        let name = name.into();
        if self.cache.contains_key(&name) {
            tracing::debug!(name = %name, "Overwriting cached resource");
        }
        self.cache.insert(name, resource);
    }

    /// Look up a resource by logical name
    pub fn get(&self, name: &str) -> Option<&ProvisionedResource> {
        self.cache.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Cached resources in the order they were first stored
    pub fn resources(&self) -> impl Iterator<Item = (&String, &ProvisionedResource)> {
        self.cache.iter()
    }
}
