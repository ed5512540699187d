//! kubectl CLI wrapper
//!
//! Wraps the kubectl commands the provider needs: `get` by name and
//! `create` from a manifest piped on stdin. Both request JSON output.

use crate::error::{KubernetesError, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// kubectl CLI wrapper
#[derive(Debug, Clone, Default)]
pub struct Kubectl {
    /// kubeconfig context (`--context`)
    context: Option<String>,
    /// kubeconfig file (`--kubeconfig`)
    kubeconfig: Option<PathBuf>,
}

impl Kubectl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_kubeconfig(mut self, kubeconfig: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(kubeconfig.into());
        self
    }

    /// Check that kubectl is on PATH
    pub async fn check_available(&self) -> Result<()> {
        let which = Command::new("which").arg("kubectl").output().await?;
        if !which.status.success() {
            return Err(KubernetesError::KubectlNotFound);
        }
        Ok(())
    }

    /// `kubectl get <kind> <name> [-n <namespace>] -o json`
    pub async fn get(
        &self,
        kind: &str,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<serde_json::Value> {
        let output = self.run_command(&get_args(kind, name, namespace), None).await?;
        Ok(serde_json::from_str(&output)?)
    }

    /// `kubectl create -f - -o json` with the manifest on stdin
    pub async fn create(&self, manifest: &serde_json::Value) -> Result<serde_json::Value> {
        let input = serde_json::to_string(manifest)?;
        let output = self.run_command(&create_args(), Some(&input)).await?;
        Ok(serde_json::from_str(&output)?)
    }

    fn base_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        if let Some(kubeconfig) = &self.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        args
    }

    /// Run a kubectl command and return stdout
    async fn run_command(&self, args: &[String], stdin: Option<&str>) -> Result<String> {
        tracing::debug!("Running: kubectl {}", args.join(" "));

        let mut full_args = self.base_args();
        full_args.extend_from_slice(args);
        run("kubectl", &full_args, stdin).await
    }
}

/// Run `program`, optionally feeding `stdin`, and return stdout
///
/// A failed write to stdin is not reported on its own: the exit status and
/// stderr of the process decide the error.
async fn run(program: &str, args: &[String], stdin: Option<&str>) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => KubernetesError::KubectlNotFound,
        _ => KubernetesError::IoError(e),
    })?;

    let mut write_error = None;
    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        if let Err(e) = pipe.write_all(input.as_bytes()).await {
            tracing::debug!("Writing to {} stdin failed: {}", program, e);
            write_error = Some(e);
        }
        // Close stdin so the process sees EOF
        drop(pipe);
    }

    let output = child.wait_with_output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if is_not_found(&stderr) {
            return Err(KubernetesError::NotFound(stderr));
        }
        return Err(KubernetesError::CommandFailed(stderr));
    }

    if let Some(e) = write_error {
        return Err(KubernetesError::IoError(e));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn get_args(kind: &str, name: &str, namespace: Option<&str>) -> Vec<String> {
    let mut args = vec!["get".to_string(), kind.to_string(), name.to_string()];
    if let Some(namespace) = namespace {
        args.push("-n".to_string());
        args.push(namespace.to_string());
    }
    args.push("-o".to_string());
    args.push("json".to_string());
    args
}

fn create_args() -> Vec<String> {
    ["create", "-f", "-", "-o", "json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// kubectl reports missing objects as `Error from server (NotFound): ...`
fn is_not_found(stderr: &str) -> bool {
    stderr.contains("(NotFound)")
}
