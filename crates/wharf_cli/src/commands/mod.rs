//! CLI command definitions.
//!
//! This module defines the command structure for the wharf CLI. Each
//! subcommand maps to one step of the local environment lifecycle.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

pub mod magento;
pub mod setup;
pub mod start;
pub mod stop;

/// Name of the generated output directory inside the project root.
pub const WHARF_DIR: &str = ".wharf";

/// wharf - Magento 2 Docker development environments
#[derive(Parser)]
#[command(name = "wharf")]
#[command(version, about = "wharf - Magento 2 Docker development environments")]
#[command(long_about = r#"
wharf manages local Magento 2 development environments: it resolves a
consistent set of service versions from wharf.yaml, renders them into a
docker compose environment, and fronts every project with a shared Traefik
reverse proxy terminating TLS for *.test domains.

WORKFLOWS:
  setup    → Resolve wharf.yaml and generate the .wharf environment
  start    → Start the environment (and the shared proxy)
  stop     → Stop the environment
  magento  → Run bin/magento inside the PHP container

EXIT CODES:
  0 - Success
  1 - General error
  3 - Configuration or resolution error
  4 - Template rendering error
  5 - Engine or precondition error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the Docker environment from wharf.yaml
    Setup(setup::SetupArgs),

    /// Start the Docker environment
    Start(start::StartArgs),

    /// Stop the Docker environment
    Stop(stop::StopArgs),

    /// Run bin/magento inside the PHP container
    Magento(magento::MagentoArgs),
}

/// A required prior step has not been completed (e.g. `wharf setup` before
/// `wharf start`). The message tells the user which command to run.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct PreconditionError(pub String);

/// Resolve the project's output directory, failing with a pointer to
/// `wharf setup` when it does not exist yet.
pub fn require_wharf_dir(cwd: &Path) -> Result<PathBuf, PreconditionError> {
    let dir = cwd.join(WHARF_DIR);
    if !dir.is_dir() {
        return Err(PreconditionError(
            ".wharf directory not found. Please run 'wharf setup' first".to_string(),
        ));
    }
    Ok(dir)
}
