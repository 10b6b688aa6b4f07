//! Shared Traefik reverse proxy bootstrap.
//!
//! One Traefik instance serves every wharf project on the machine,
//! terminating TLS for `*.test` domains with a self-signed certificate. Its
//! configuration lives in `~/.wharf-traefik/` and is fixed: projects attach
//! themselves through compose labels, never by editing the proxy config.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::compose::{compose_up, container_running};
use crate::error::{EngineError, EngineResult};

const TRAEFIK_COMPOSE: &str = include_str!("../assets/traefik-compose.yml");
const TRAEFIK_TLS: &str = include_str!("../assets/traefik-tls.yml");

/// Container name of the shared proxy.
pub const TRAEFIK_CONTAINER: &str = "wharf_traefik";

/// Directory holding the shared proxy state.
pub fn traefik_dir() -> EngineResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".wharf-traefik"))
        .ok_or(EngineError::NoHomeDir)
}

/// Whether the shared proxy container is currently running.
pub async fn is_running() -> bool {
    container_running(TRAEFIK_CONTAINER).await
}

/// Make sure the shared proxy exists and is running. Idempotent: probes
/// first and bootstraps only on a miss.
pub async fn ensure_running() -> EngineResult<()> {
    if is_running().await {
        debug!("Traefik already running");
        return Ok(());
    }
    setup().await
}

/// Bootstrap the proxy directory, certificates and container.
pub async fn setup() -> EngineResult<()> {
    let dir = traefik_dir()?;

    for sub in [dir.clone(), dir.join("certs"), dir.join("dynamic")] {
        fs::create_dir_all(&sub).map_err(|source| EngineError::Io { path: sub, source })?;
    }

    write_asset(&dir.join("docker-compose.yml"), TRAEFIK_COMPOSE)?;
    write_asset(&dir.join("dynamic").join("tls.yml"), TRAEFIK_TLS)?;

    generate_certificates(&dir.join("certs")).await?;

    info!("Starting Traefik reverse proxy");
    compose_up(&dir).await
}

fn write_asset(path: &Path, content: &str) -> EngineResult<()> {
    fs::write(path, content).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate a self-signed wildcard certificate for `*.test`, skipping when
/// one already exists.
async fn generate_certificates(certs_dir: &Path) -> EngineResult<()> {
    let cert_path = certs_dir.join("local-cert.pem");
    let key_path = certs_dir.join("local-key.pem");

    if cert_path.exists() {
        debug!("Certificate already present at {:?}", cert_path);
        return Ok(());
    }

    info!("Generating self-signed certificate for *.test");
    let status = Command::new("openssl")
        .args(["req", "-x509", "-newkey", "rsa:4096", "-keyout"])
        .arg(&key_path)
        .arg("-out")
        .arg(&cert_path)
        .args(["-days", "365", "-nodes", "-subj"])
        .arg("/CN=*.test/O=Wharf Local Development")
        .args(["-addext", "subjectAltName=DNS:*.test,DNS:test"])
        .status()
        .await
        .map_err(|source| EngineError::Spawn {
            command: "openssl req".to_string(),
            source,
        })?;

    if !status.success() {
        return Err(EngineError::CommandFailed {
            command: "openssl req".to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}
