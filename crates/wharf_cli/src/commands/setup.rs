//! Setup command - resolve wharf.yaml and generate the Docker environment.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use wharf_catalog::VersionCatalog;
use wharf_compose::ComposeRenderer;
use wharf_config::{detect, loader, resolve, ResolvedConfig, WHARF_FILE};
use wharf_engine::traefik;

use super::WHARF_DIR;

#[derive(Args)]
pub struct SetupArgs {
    /// Overwrite an existing .wharf directory without asking
    #[arg(short, long)]
    yes: bool,
}

pub async fn execute(args: SetupArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(WHARF_FILE);
    let wharf_dir = cwd.join(WHARF_DIR);

    if wharf_dir.exists() && !args.yes {
        println!("The {WHARF_DIR} directory already exists.");
        if !ask_confirmation("Do you want to overwrite it?")? {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    if !config_path.exists() {
        println!("{WHARF_FILE} not found. Detecting Magento version from composer.json...");

        let magento_version = detect::detect_magento_version(&cwd).context(
            "failed to detect the Magento version; create a wharf.yaml with a magento key",
        )?;
        println!("Detected Magento version: {magento_version}");

        let project_name = cwd
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "magento".to_string());

        println!(
            "Creating {WHARF_FILE} with project name '{project_name}' and Magento version '{magento_version}'..."
        );
        loader::write_initial(&config_path, &project_name, Some(magento_version))?;
        println!("{WHARF_FILE} created successfully!");
    }

    let catalog = VersionCatalog::bundled()?;
    let config = loader::load(&config_path)?;
    let resolved = resolve(&catalog, config)?;

    println!("Setting up wharf environment for project: {}", resolved.project);
    print_summary(&resolved);

    if traefik::is_running().await {
        println!("Traefik is already running");
    } else {
        println!("Setting up Traefik reverse proxy...");
        traefik::ensure_running()
            .await
            .context("failed to set up the Traefik reverse proxy")?;
        println!("Traefik is running");
    }

    println!("Generating Docker configuration files...");
    let written = ComposeRenderer::new().render(&resolved, &wharf_dir)?;
    info!("Wrote {} files to {:?}", written.len(), wharf_dir);

    update_gitignore(&cwd);

    println!();
    println!("Setup completed successfully!");
    println!();
    println!("Your project will be available at: https://{}", resolved.domain());
    if let Some(port) = resolved.swoole_port() {
        println!(
            "Swoole API will be available at: https://{} (port {port})",
            resolved.api_domain()
        );
    }
    println!();
    println!("Next steps:");
    println!("  1. Run 'wharf start' to start the environment");
    println!("  2. Access your site at https://{}", resolved.domain());
    if resolved.swoole_enabled() {
        println!("  3. Start the Swoole server: wharf magento swoole:server:start");
        println!("  4. Run 'wharf magento' to execute other Magento commands");
    } else {
        println!("  3. Run 'wharf magento' to execute Magento commands");
    }
    println!();
    println!("Note: you may need to add the SSL certificate to your trusted certificates.");
    if let Ok(dir) = traefik::traefik_dir() {
        println!("Certificate location: {}/certs/local-cert.pem", dir.display());
    }

    Ok(())
}

fn print_summary(resolved: &ResolvedConfig) {
    match &resolved.magento {
        Some(version) => {
            println!();
            println!("Magento version: {version}");
            println!("Using auto-detected versions:");
        }
        None => {
            println!();
            println!("Using specified versions:");
        }
    }
    println!("  - PHP: {}", resolved.php.version);
    if !resolved.php.extensions.is_empty() {
        println!("    Extensions: {}", resolved.php.extensions.join(", "));
    }
    println!("  - Nginx: {}", resolved.nginx.version);
    println!("  - MariaDB: {}", resolved.mariadb.version);
    println!("  - OpenSearch: {}", resolved.opensearch.version);
    println!("  - Redis: {}", resolved.redis.version);
    println!("  - RabbitMQ: {}", resolved.rabbitmq.version);
    if let Some(node) = &resolved.node {
        println!("  - Node.js: {node}");
    }
    if let Some(port) = resolved.swoole_port() {
        println!("  - Swoole: enabled");
        println!("    API: https://{} (port {port})", resolved.api_domain());
    }
    println!();
}

/// Ask a y/N question on the terminal.
fn ask_confirmation(message: &str) -> Result<bool> {
    print!("{message} (y/N): ");
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Add `.wharf/` to an existing .gitignore. Failures only warn: a broken
/// .gitignore must not fail the setup.
fn update_gitignore(cwd: &Path) {
    let path = cwd.join(".gitignore");
    let Ok(content) = fs::read_to_string(&path) else {
        return;
    };
    if let Some(updated) = with_wharf_ignored(&content) {
        match fs::write(&path, updated) {
            Ok(()) => println!("Added {WHARF_DIR}/ to .gitignore"),
            Err(err) => println!("Warning: failed to update .gitignore: {err}"),
        }
    }
}

/// Append `.wharf/` to gitignore content unless already present.
fn with_wharf_ignored(content: &str) -> Option<String> {
    let already = content
        .lines()
        .any(|line| matches!(line.trim(), ".wharf" | ".wharf/" | "/.wharf" | "/.wharf/"));
    if already {
        return None;
    }

    let mut updated = content.to_string();
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(".wharf/\n");
    Some(updated)
}
