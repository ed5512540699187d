use super::BuildArgs;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use stratum_cloud::{
    BuildContext, ChainSecretStore, EnvSecretStore, MapSecretStore, MemoryProvider,
    ProviderClient, ResourceBuilder,
};
use stratum_cloud_kubernetes::{Kubectl, KubernetesProvider};
use tracing::{debug, info};

pub async fn handle(config: Option<&Path>, args: &BuildArgs) -> anyhow::Result<()> {
    let config = super::load(config)?;

    let mut secrets = ChainSecretStore::new();
    if let Some(path) = &args.secrets {
        let store = MapSecretStore::from_yaml_file(path)
            .with_context(|| format!("Failed to read secrets from {}", path.display()))?;
        secrets = secrets.with_store(store);
    }
    let secrets = secrets.with_store(EnvSecretStore::new(&args.secret_prefix));

    let provider = create_provider(args).await?;
    info!(provider = provider.name(), dry_run = args.dry_run, "Starting build");

    let targets: Vec<_> = config
        .environments()
        .filter(|t| args.target.matches(t))
        .collect();
    if targets.is_empty() {
        anyhow::bail!("No environment matches the given --team/--service/--environment");
    }

    for target in targets {
        println!();
        println!("{} {}", "Building".blue().bold(), target.path().cyan());

        let Some(spec) = &target.environment.kubernetes else {
            debug!(environment = %target.path(), "No kubernetes resources declared");
            println!("  {}", "(no resources declared)".dimmed());
            continue;
        };

        let mut context = BuildContext::for_target(&target);
        ResourceBuilder::new(&mut context, provider.as_ref(), &secrets)
            .build(spec.clone())
            .await
            .with_context(|| format!("Failed to build {}", target.path()))?;

        for (name, resource) in context.resources() {
            println!(
                "  {} {} {} -> {}",
                "✓".green(),
                resource.kind,
                name.bold(),
                resource.id
            );
        }

        let skipped = spec.len().saturating_sub(context.len());
        if skipped > 0 {
            println!(
                "  {}",
                format!("{} declaration(s) not built, see warnings", skipped).yellow()
            );
        }
    }

    println!();
    if args.dry_run {
        println!("{}", "Dry run complete, nothing was sent to the cluster".green().bold());
    } else {
        println!("{}", "✓ Build complete".green().bold());
    }

    Ok(())
}

async fn create_provider(args: &BuildArgs) -> anyhow::Result<Box<dyn ProviderClient>> {
    if args.dry_run {
        return Ok(Box::new(MemoryProvider::new()));
    }

    let mut kubectl = Kubectl::new();
    if let Some(context) = &args.kube_context {
        kubectl = kubectl.with_context(context);
    }
    if let Some(kubeconfig) = &args.kubeconfig {
        kubectl = kubectl.with_kubeconfig(kubeconfig);
    }

    let provider = KubernetesProvider::new(kubectl);
    provider.check().await?;
    Ok(Box::new(provider))
}
