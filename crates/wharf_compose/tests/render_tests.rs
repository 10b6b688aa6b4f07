//! Integration tests for output-tree rendering.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use wharf_compose::ComposeRenderer;
use wharf_config::{ResolvedConfig, ResolvedPhp, ResolvedService, ResolvedSwoole};

fn service(version: &str) -> ResolvedService {
    ResolvedService {
        version: version.to_string(),
        configuration: BTreeMap::new(),
    }
}

fn resolved_config(swoole: ResolvedSwoole) -> ResolvedConfig {
    ResolvedConfig {
        project: "shop".to_string(),
        magento: Some("2.4.7".to_string()),
        php: ResolvedPhp {
            version: "8.3".to_string(),
            extensions: vec![
                "bcmath".to_string(),
                "gd".to_string(),
                "intl".to_string(),
                "opcache".to_string(),
            ],
        },
        nginx: service("1.26"),
        mariadb: service("10.6"),
        opensearch: service("2.12"),
        redis: service("7.2"),
        rabbitmq: service("3.13"),
        node: None,
        swoole,
    }
}

/// Collect relative path -> content for every file under `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if entry.path().is_file() {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            files.insert(relative, fs::read(entry.path()).unwrap());
        }
    }
    files
}

#[test]
fn render_produces_fixed_layout() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".wharf");

    let written = ComposeRenderer::new()
        .render(&resolved_config(ResolvedSwoole::default()), &target)
        .unwrap();

    let expected: Vec<PathBuf> = [
        "docker-compose.yml",
        "mariadb/my.cnf",
        "nginx/default.conf",
        "nginx/nginx.conf",
        "php/Dockerfile",
        "php/php-fpm.conf",
        "php/php.ini",
    ]
    .iter()
    .map(|p| target.join(p))
    .collect();

    assert_eq!(written.into_iter().collect::<Vec<_>>(), expected);
    for path in &expected {
        assert!(path.is_file(), "missing {path:?}");
    }
}

#[test]
fn render_is_deterministic() {
    let renderer = ComposeRenderer::new();
    let config = resolved_config(ResolvedSwoole {
        enabled: true,
        port: Some(9501),
    });

    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let target_a = dir_a.path().join(".wharf");
    let target_b = dir_b.path().join(".wharf");

    renderer.render(&config, &target_a).unwrap();
    renderer.render(&config, &target_b).unwrap();

    assert_eq!(snapshot(&target_a), snapshot(&target_b));
}

#[test]
fn swoole_disabled_emits_no_api_routing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".wharf");

    ComposeRenderer::new()
        .render(&resolved_config(ResolvedSwoole::default()), &target)
        .unwrap();

    let compose = fs::read_to_string(target.join("docker-compose.yml")).unwrap();
    assert!(!compose.contains("api.shop.test"));
    assert!(!compose.contains("ports:"));
    assert!(compose.contains("INSTALL_OPENSWOOLE: \"false\""));
}

#[test]
fn swoole_enabled_emits_consistent_port_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".wharf");

    ComposeRenderer::new()
        .render(
            &resolved_config(ResolvedSwoole {
                enabled: true,
                port: Some(9501),
            }),
            &target,
        )
        .unwrap();

    let compose = fs::read_to_string(target.join("docker-compose.yml")).unwrap();
    assert!(compose.contains("\"9501:9501\""));
    assert!(compose.contains("Host(`api.shop.test`)"));
    assert!(compose.contains("loadbalancer.server.port=9501"));
    assert!(compose.contains("INSTALL_OPENSWOOLE: \"true\""));
}

#[test]
fn rerender_replaces_existing_output_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".wharf");
    let renderer = ComposeRenderer::new();

    renderer
        .render(&resolved_config(ResolvedSwoole::default()), &target)
        .unwrap();

    // A manual edit and a stray file must both be gone after a re-render.
    fs::write(target.join("docker-compose.yml"), "edited").unwrap();
    fs::write(target.join("stray.txt"), "leftover").unwrap();

    renderer
        .render(&resolved_config(ResolvedSwoole::default()), &target)
        .unwrap();

    assert!(!target.join("stray.txt").exists());
    let compose = fs::read_to_string(target.join("docker-compose.yml")).unwrap();
    assert!(compose.contains("image: nginx:1.26-alpine"));
}

#[test]
fn versions_land_in_descriptor_and_service_files() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(".wharf");

    ComposeRenderer::new()
        .render(&resolved_config(ResolvedSwoole::default()), &target)
        .unwrap();

    let compose = fs::read_to_string(target.join("docker-compose.yml")).unwrap();
    assert!(compose.contains("image: mariadb:10.6"));
    assert!(compose.contains("opensearchproject/opensearch:2.12"));
    assert!(compose.contains("image: redis:7.2-alpine"));
    assert!(compose.contains("rabbitmq:3.13-management-alpine"));
    assert!(compose.contains("container_name: shop_php"));

    let site = fs::read_to_string(target.join("nginx/default.conf")).unwrap();
    assert!(site.contains("server_name shop.test;"));

    let dockerfile = fs::read_to_string(target.join("php/Dockerfile")).unwrap();
    assert!(dockerfile.contains("bcmath \\\n        gd"));
}
