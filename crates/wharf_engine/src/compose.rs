//! docker compose invocation against a generated output directory.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Run `docker compose up -d` in `dir` with inherited stdio.
pub async fn compose_up(dir: &Path) -> EngineResult<()> {
    run_streamed("docker", &["compose", "up", "-d"], Some(dir)).await
}

/// Run `docker compose down` in `dir` with inherited stdio.
pub async fn compose_down(dir: &Path) -> EngineResult<()> {
    run_streamed("docker", &["compose", "down"], Some(dir)).await
}

/// Check whether a container with the given name is running. Probe failures
/// (docker absent, daemon down) read as "not running".
pub async fn container_running(name: &str) -> bool {
    let filter = format!("name={name}");
    let output = Command::new("docker")
        .args(["ps", "--filter", filter.as_str(), "--format", "{{.Names}}"])
        .output()
        .await;

    match output {
        Ok(output) => output.status.success() && !output.stdout.is_empty(),
        Err(err) => {
            debug!("docker ps probe failed: {err}");
            false
        }
    }
}

/// Forward a `bin/magento` invocation into the running PHP container,
/// attached to the caller's terminal.
pub async fn exec_magento(container: &str, args: &[String]) -> EngineResult<()> {
    let mut full_args = vec![
        "exec".to_string(),
        "-it".to_string(),
        container.to_string(),
        "php".to_string(),
        "bin/magento".to_string(),
    ];
    full_args.extend(args.iter().cloned());

    let args_ref: Vec<&str> = full_args.iter().map(String::as_str).collect();
    run_streamed("docker", &args_ref, None).await
}

/// Run a command with inherited stdio, failing on a non-zero exit status.
pub(crate) async fn run_streamed(
    program: &str,
    args: &[&str],
    dir: Option<&Path>,
) -> EngineResult<()> {
    let command_line = format!("{program} {}", args.join(" "));
    debug!("Running: {command_line}");

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let status = command
        .status()
        .await
        .map_err(|source| EngineError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if !status.success() {
        return Err(EngineError::CommandFailed {
            command: command_line,
            status: status.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_container_reads_not_running() {
        // Holds whether docker is installed or not: a missing daemon and a
        // missing container both read as "not running".
        assert!(!container_running("wharf_no_such_container_000").await);
    }
}
