mod commands;

use clap::{Parser, Subcommand};
use commands::{BuildArgs, TargetArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stratum")]
#[command(version, about = "Declarative Kubernetes provisioning for teams, services and environments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: discovered from the current directory)
    #[arg(short, long, global = true, env = stratum_config::CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the resources of every selected environment
    Build(BuildArgs),
    /// Validate the configuration file and list its declarations
    Validate {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Version => {
            println!("stratum {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate { target } => {
            commands::validate::handle(cli.config.as_deref(), &target)?;
        }
        Commands::Build(args) => {
            commands::build::handle(cli.config.as_deref(), &args).await?;
        }
    }

    Ok(())
}
