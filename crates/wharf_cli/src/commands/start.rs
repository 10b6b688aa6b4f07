//! Start command - bring up the Docker environment.

use anyhow::{Context, Result};
use clap::Args;

use wharf_catalog::VersionCatalog;
use wharf_config::{loader, resolve, WHARF_FILE};
use wharf_engine::{compose_up, traefik};

use super::require_wharf_dir;

#[derive(Args)]
pub struct StartArgs {}

pub async fn execute(_args: StartArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let wharf_dir = require_wharf_dir(&cwd)?;

    let catalog = VersionCatalog::bundled()?;
    let resolved = resolve(&catalog, loader::load(cwd.join(WHARF_FILE))?)?;

    if !traefik::is_running().await {
        println!("Starting Traefik reverse proxy...");
    }
    traefik::ensure_running()
        .await
        .context("failed to start the Traefik reverse proxy")?;

    println!("Starting Docker environment for: {}", resolved.project);
    compose_up(&wharf_dir).await?;

    println!();
    println!("Environment started successfully!");
    println!();
    println!("Your site is available at: https://{}", resolved.domain());
    if let Some(port) = resolved.swoole_port() {
        println!(
            "Swoole API endpoint: https://{} (port {port})",
            resolved.api_domain()
        );
        println!("   Start with: wharf magento swoole:server:start");
    }
    println!();
    println!("Services:");
    println!("  - Web: https://{}", resolved.domain());
    if resolved.swoole_enabled() {
        println!("  - Swoole API: https://{}", resolved.api_domain());
    }
    println!("  - Traefik dashboard: http://localhost:8080");
    println!(
        "  - Database: {}:3306 (user: magento, password: magento)",
        resolved.container_name("mariadb")
    );
    println!("  - Redis: {}:6379", resolved.container_name("redis"));
    println!("  - OpenSearch: {}:9200", resolved.container_name("opensearch"));
    println!(
        "  - RabbitMQ: {}:15672 (user: guest, password: guest)",
        resolved.container_name("rabbitmq")
    );

    Ok(())
}
