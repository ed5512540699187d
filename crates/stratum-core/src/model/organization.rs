//! Organizational units: team -> service -> environment

use super::kubernetes::KubernetesSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of a Stratum configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Config {
    /// Walk every environment together with its owning team and service,
    /// in declaration order.
    pub fn environments(&self) -> impl Iterator<Item = EnvironmentTarget<'_>> {
        self.teams.iter().flat_map(|team| {
            team.services.iter().flat_map(move |service| {
                service
                    .environments
                    .iter()
                    .map(move |environment| EnvironmentTarget {
                        team,
                        service,
                        environment,
                    })
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,

    #[serde(default)]
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,

    #[serde(default)]
    pub environments: Vec<Environment>,
}

/// One deployment environment (dev, stg, prod, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,

    /// Region or location hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Platform project / account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Labels applied to every resource created in this environment
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesSpec>,
}

/// An environment located within its organizational units
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentTarget<'a> {
    pub team: &'a Team,
    pub service: &'a Service,
    pub environment: &'a Environment,
}

impl EnvironmentTarget<'_> {
    /// `team/service/environment`, used in logs and summaries
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.team.name, self.service.name, self.environment.name
        )
    }

    /// Match optional team / service / environment filters
    pub fn matches(
        &self,
        team: Option<&str>,
        service: Option<&str>,
        environment: Option<&str>,
    ) -> bool {
        team.is_none_or(|t| t == self.team.name)
            && service.is_none_or(|s| s == self.service.name)
            && environment.is_none_or(|e| e == self.environment.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            teams: vec![Team {
                name: "platform".to_string(),
                services: vec![
                    Service {
                        name: "billing".to_string(),
                        environments: vec![
                            Environment {
                                name: "dev".to_string(),
                                ..Default::default()
                            },
                            Environment {
                                name: "prod".to_string(),
                                ..Default::default()
                            },
                        ],
                    },
                    Service {
                        name: "search".to_string(),
                        environments: vec![Environment {
                            name: "dev".to_string(),
                            ..Default::default()
                        }],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_environments_walk_in_order() {
        let config = sample();
        let paths: Vec<String> = config.environments().map(|t| t.path()).collect();
        assert_eq!(
            paths,
            vec![
                "platform/billing/dev",
                "platform/billing/prod",
                "platform/search/dev"
            ]
        );
    }

    #[test]
    fn test_target_filters() {
        let config = sample();
        let dev: Vec<String> = config
            .environments()
            .filter(|t| t.matches(None, None, Some("dev")))
            .map(|t| t.path())
            .collect();
        assert_eq!(dev, vec!["platform/billing/dev", "platform/search/dev"]);

        let none = config
            .environments()
            .filter(|t| t.matches(Some("other"), None, None))
            .count();
        assert_eq!(none, 0);
    }
}
