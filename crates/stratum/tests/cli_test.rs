#![allow(deprecated)] // TODO: move from Command::cargo_bin to cargo_bin_cmd!

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
teams:
  - name: platform
    services:
      - name: billing
        environments:
          - name: dev
            kubernetes:
              namespaces:
                - name: core
                  args: {}
              secrets:
                - name: db
                  args:
                    metadata:
                      namespace: "Resource core, metadata->name"
                    string_data:
                      password: "Secret dbPassword"
          - name: prod
"#;

fn stratum() -> Command {
    let mut cmd = Command::cargo_bin("stratum").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("STRATUM_CONFIG_PATH")
        .env_remove("STRATUM_ENVIRONMENT")
        .env_remove("RUST_LOG");
    cmd
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stratum.yaml"), CONFIG).unwrap();
    std::fs::write(dir.path().join("secrets.yaml"), "dbPassword: hunter2\n").unwrap();
    dir
}

fn config_path(dir: &Path) -> String {
    dir.join("stratum.yaml").display().to_string()
}

/// CLI help lists the subcommands
#[test]
fn test_cli_help() {
    stratum()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Declarative Kubernetes provisioning"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_cli_version() {
    stratum()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "stratum {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_build_help() {
    stratum()
        .arg("build")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--secrets"))
        .stdout(predicate::str::contains("--kube-context"));
}

#[test]
fn test_validate_discovers_config() {
    let dir = project();

    stratum()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("platform/billing/dev"))
        .stdout(predicate::str::contains("platform/billing/prod (no resources)"))
        .stdout(predicate::str::contains("secret db (create)"));
}

#[test]
fn test_validate_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stratum.yaml");
    std::fs::write(
        &path,
        r#"
teams:
  - name: ""
"#,
    )
    .unwrap();

    stratum()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("team name must not be empty"));
}

#[test]
fn test_dry_run_build() {
    let dir = project();

    stratum()
        .current_dir(dir.path())
        .args(["build", "--dry-run", "--environment", "dev"])
        .arg("--config")
        .arg(config_path(dir.path()))
        .arg("--secrets")
        .arg(dir.path().join("secrets.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Building platform/billing/dev"))
        .stdout(predicate::str::contains(
            "namespace core -> platform-billing-dev-core",
        ))
        .stdout(predicate::str::contains(
            "secret db -> platform-billing-dev-core/platform-billing-dev-db",
        ))
        .stdout(predicate::str::contains("Dry run complete"))
        .stderr(predicate::str::contains("Starting build"));
}

#[test]
fn test_validate_rejects_name_shared_across_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stratum.yaml");
    std::fs::write(
        &path,
        r#"
teams:
  - name: platform
    services:
      - name: billing
        environments:
          - name: dev
            kubernetes:
              namespaces:
                - name: app
                  args: {}
              configmaps:
                - name: app
                  args: {}
"#,
    )
    .unwrap();

    stratum()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Duplicate configmap name 'app' in environment 'dev'",
        ));
}

#[test]
fn test_dry_run_build_missing_secret_fails() {
    let dir = project();

    stratum()
        .current_dir(dir.path())
        .args(["build", "--dry-run", "--secret-prefix", "STRATUM_CLI_TEST_UNSET_"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Secret not configured: dbPassword"));
}

#[test]
fn test_build_unknown_environment_fails() {
    let dir = project();

    stratum()
        .current_dir(dir.path())
        .args(["build", "--dry-run", "--environment", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No environment matches"));
}
