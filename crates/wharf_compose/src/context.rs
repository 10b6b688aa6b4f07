//! Template variable map built from a resolved configuration.

use std::collections::BTreeMap;

use wharf_config::ResolvedConfig;

/// Build the substitution variables for the render plan.
///
/// This is the single place the renderer branches: the Swoole toggle gates
/// the compose fragments for port publication, the `api.{project}.test`
/// router labels, and the extra proxy-network attachment. Everything else is
/// plain substitution.
pub fn build_variables(config: &ResolvedConfig) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();

    vars.insert("project".to_string(), config.project.clone());
    vars.insert("php_version".to_string(), config.php.version.clone());
    vars.insert("nginx_version".to_string(), config.nginx.version.clone());
    vars.insert("mariadb_version".to_string(), config.mariadb.version.clone());
    vars.insert(
        "opensearch_version".to_string(),
        config.opensearch.version.clone(),
    );
    vars.insert("redis_version".to_string(), config.redis.version.clone());
    vars.insert(
        "rabbitmq_version".to_string(),
        config.rabbitmq.version.clone(),
    );
    vars.insert(
        "php_extensions".to_string(),
        config.php.extensions.join(" \\\n        "),
    );
    vars.insert(
        "install_openswoole".to_string(),
        config.swoole_enabled().to_string(),
    );

    match config.swoole_port() {
        Some(port) => {
            let project = &config.project;
            vars.insert(
                "swoole_network".to_string(),
                "\n      - traefik_network".to_string(),
            );
            vars.insert(
                "swoole_ports".to_string(),
                format!("\n    ports:\n      - \"{port}:{port}\""),
            );
            vars.insert(
                "swoole_labels".to_string(),
                format!(
                    "\n    labels:\
                     \n      - \"traefik.enable=true\"\
                     \n      - \"traefik.http.routers.{project}-swoole.rule=Host(`api.{project}.test`)\"\
                     \n      - \"traefik.http.routers.{project}-swoole.entrypoints=websecure\"\
                     \n      - \"traefik.http.routers.{project}-swoole.tls=true\"\
                     \n      - \"traefik.http.routers.{project}-swoole.service={project}-swoole\"\
                     \n      - \"traefik.http.services.{project}-swoole.loadbalancer.server.port={port}\""
                ),
            );
        }
        None => {
            vars.insert("swoole_network".to_string(), String::new());
            vars.insert("swoole_ports".to_string(), String::new());
            vars.insert("swoole_labels".to_string(), String::new());
        }
    }

    vars
}
