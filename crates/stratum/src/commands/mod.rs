pub mod build;
pub mod validate;

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use stratum_cloud::secrets::DEFAULT_SECRET_PREFIX;
use stratum_core::{Config, EnvironmentTarget};

/// Team / service / environment filters
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Only this team
    #[arg(short, long)]
    pub team: Option<String>,

    /// Only this service
    #[arg(short, long)]
    pub service: Option<String>,

    /// Only this environment (dev, stg, prod, ...)
    #[arg(short, long, env = "STRATUM_ENVIRONMENT")]
    pub environment: Option<String>,
}

impl TargetArgs {
    pub fn matches(&self, target: &EnvironmentTarget<'_>) -> bool {
        target.matches(
            self.team.as_deref(),
            self.service.as_deref(),
            self.environment.as_deref(),
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Build against an in-memory provider; nothing is sent to the cluster
    #[arg(long)]
    pub dry_run: bool,

    /// YAML file of `name: value` secrets, consulted before the environment
    #[arg(long)]
    pub secrets: Option<PathBuf>,

    /// Environment variable prefix for secrets
    #[arg(long, default_value = DEFAULT_SECRET_PREFIX)]
    pub secret_prefix: String,

    /// kubeconfig context to use
    #[arg(long)]
    pub kube_context: Option<String>,

    /// kubeconfig file to use
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,
}

/// Locate and load the configuration file
pub fn load(config: Option<&Path>) -> anyhow::Result<Config> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => stratum_config::find_config_file()?,
    };

    println!(
        "{}: {}",
        "Configuration".bold(),
        path.display().to_string().cyan()
    );

    stratum_core::load_config(&path)
        .with_context(|| format!("Failed to load {}", path.display()))
}
