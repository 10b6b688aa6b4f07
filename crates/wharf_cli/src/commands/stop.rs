//! Stop command - tear down the Docker environment.

use anyhow::Result;
use clap::Args;

use wharf_catalog::VersionCatalog;
use wharf_config::{loader, resolve, WHARF_FILE};
use wharf_engine::compose_down;

use super::require_wharf_dir;

#[derive(Args)]
pub struct StopArgs {}

pub async fn execute(_args: StopArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let wharf_dir = require_wharf_dir(&cwd)?;

    let catalog = VersionCatalog::bundled()?;
    let resolved = resolve(&catalog, loader::load(cwd.join(WHARF_FILE))?)?;

    println!("Stopping Docker environment for: {}", resolved.project);
    compose_down(&wharf_dir).await?;

    println!("Environment stopped successfully!");
    Ok(())
}
