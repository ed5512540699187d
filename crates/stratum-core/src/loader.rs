//! Configuration loader
//!
//! Reads a YAML configuration file into [`Config`] and validates names.

use crate::error::{CoreError, Result};
use crate::model::{Config, Environment, ResourceDeclaration};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Load and validate a configuration file
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = content.len(), "Read configuration file");

    let config = parse_config(&content)?;
    info!(
        teams = config.teams.len(),
        environments = config.environments().count(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Parse and validate configuration from a YAML string
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Validate organizational names and logical name uniqueness per environment
pub fn validate(config: &Config) -> Result<()> {
    for team in &config.teams {
        require_name("team", &team.name)?;
        for service in &team.services {
            require_name("service", &service.name)?;
            for environment in &service.environments {
                require_name("environment", &environment.name)?;
                validate_environment(environment)?;
            }
        }
    }
    Ok(())
}

fn validate_environment(environment: &Environment) -> Result<()> {
    let Some(spec) = &environment.kubernetes else {
        return Ok(());
    };

    // Logical names share one cache per environment, across all kinds
    let mut seen = HashSet::new();
    check_unique("namespace", &environment.name, &spec.namespaces, &mut seen)?;
    check_unique("secret", &environment.name, &spec.secrets, &mut seen)?;
    check_unique("configmap", &environment.name, &spec.configmaps, &mut seen)?;
    Ok(())
}

fn check_unique<'a, A>(
    kind: &str,
    environment: &str,
    declarations: &'a [ResourceDeclaration<A>],
    seen: &mut HashSet<&'a str>,
) -> Result<()> {
    for declaration in declarations {
        require_name(kind, &declaration.name)?;
        if !seen.insert(declaration.name.as_str()) {
            return Err(CoreError::DuplicateName {
                kind: kind.to_string(),
                name: declaration.name.clone(),
                environment: environment.to_string(),
            });
        }
    }
    Ok(())
}

fn require_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidConfig(format!(
            "{} name must not be empty",
            what
        )));
    }
    Ok(())
}
