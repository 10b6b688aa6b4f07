//! Magento command - forward bin/magento invocations into the PHP container.

use anyhow::Result;
use clap::Args;

use wharf_catalog::VersionCatalog;
use wharf_config::{loader, resolve, WHARF_FILE};
use wharf_engine::{container_running, exec_magento};

use super::{require_wharf_dir, PreconditionError};

#[derive(Args)]
pub struct MagentoArgs {
    /// Arguments passed through to bin/magento
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

pub async fn execute(args: MagentoArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    require_wharf_dir(&cwd)?;

    let catalog = VersionCatalog::bundled()?;
    let resolved = resolve(&catalog, loader::load(cwd.join(WHARF_FILE))?)?;

    let container = resolved.container_name("php");
    if !container_running(&container).await {
        return Err(PreconditionError(
            "PHP container is not running. Please run 'wharf start' first".to_string(),
        )
        .into());
    }

    exec_magento(&container, &args.args).await?;
    Ok(())
}
