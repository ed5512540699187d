use super::TargetArgs;
use colored::Colorize;
use std::path::Path;
use stratum_core::ResourceDeclaration;

pub fn handle(config: Option<&Path>, target: &TargetArgs) -> anyhow::Result<()> {
    println!("{}", "Validating configuration...".blue());

    let config = super::load(config)?;

    println!("{}", "✓ Configuration is valid".green().bold());
    println!();
    println!("Summary:");
    println!("  Teams: {}", config.teams.len());

    for environment in config.environments().filter(|t| target.matches(t)) {
        let Some(spec) = &environment.environment.kubernetes else {
            println!("    - {} (no resources)", environment.path().cyan());
            continue;
        };

        println!(
            "    - {} ({} resources)",
            environment.path().cyan(),
            spec.len()
        );
        print_declarations("namespace", &spec.namespaces);
        print_declarations("secret", &spec.secrets);
        print_declarations("configmap", &spec.configmaps);
    }

    Ok(())
}

fn print_declarations<A>(kind: &str, declarations: &[ResourceDeclaration<A>]) {
    for declaration in declarations {
        let mode = match (&declaration.id, &declaration.args) {
            (Some(id), Some(_)) => format!("find {} + create", id),
            (Some(id), None) => format!("find {}", id),
            (None, Some(_)) => "create".to_string(),
            (None, None) => "nothing declared".yellow().to_string(),
        };
        println!("        {} {} ({})", kind, declaration.name.bold(), mode);
    }
}
