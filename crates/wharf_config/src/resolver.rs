//! The defaulting cascade from partial to resolved configuration.

use tracing::debug;

use wharf_catalog::{VersionCatalog, VersionRequirements};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{
    ProjectConfig, ResolvedConfig, ResolvedPhp, ResolvedService, ResolvedSwoole, ServiceOverride,
};

/// Fallback service versions, used when neither the user nor the catalog
/// supplies one.
pub const DEFAULT_PHP_VERSION: &str = "8.3";
pub const DEFAULT_NGINX_VERSION: &str = "1.28";
pub const DEFAULT_MARIADB_VERSION: &str = "11.4";
pub const DEFAULT_OPENSEARCH_VERSION: &str = "3";
pub const DEFAULT_REDIS_VERSION: &str = "7.4";
pub const DEFAULT_RABBITMQ_VERSION: &str = "4.1";

/// PHP extensions Magento needs, installed when the user pins none.
pub const DEFAULT_PHP_EXTENSIONS: &[&str] = &[
    "bcmath",
    "gd",
    "intl",
    "mbstring",
    "pdo_mysql",
    "soap",
    "sockets",
    "xsl",
    "zip",
    "opcache",
];

/// Default port for the Swoole HTTP server when enabled without one.
pub const DEFAULT_SWOOLE_PORT: u16 = 9501;

/// Resolve a partial project configuration against the version catalog.
///
/// Two phases, each filling only slots still empty: first the service
/// versions implied by the selected Magento version, then the fallback
/// constants. An explicit user value is never overwritten.
pub fn resolve(catalog: &VersionCatalog, config: ProjectConfig) -> ConfigResult<ResolvedConfig> {
    if config.project.trim().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "project name is required in wharf.yaml".to_string(),
        ));
    }

    let requirements: Option<&VersionRequirements> = match config.magento.as_deref() {
        Some(version) => Some(catalog.lookup(version).ok_or_else(|| {
            ConfigError::UnsupportedMagentoVersion {
                version: version.to_string(),
                supported: catalog.supported_versions().join(", "),
            }
        })?),
        None => None,
    };

    if let Some(req) = requirements {
        debug!(
            "Resolved Magento {} against catalog entry {}",
            config.magento.as_deref().unwrap_or_default(),
            req.version
        );
    }

    let php_override = config.php.unwrap_or_default();
    let php = ResolvedPhp {
        version: php_override
            .version
            .or_else(|| requirements.and_then(|r| r.php.clone()))
            .unwrap_or_else(|| DEFAULT_PHP_VERSION.to_string()),
        extensions: php_override
            .extensions
            .filter(|exts| !exts.is_empty())
            .unwrap_or_else(|| {
                DEFAULT_PHP_EXTENSIONS
                    .iter()
                    .map(|e| e.to_string())
                    .collect()
            }),
    };

    let nginx = resolve_service(
        config.nginx,
        requirements.and_then(|r| r.nginx.clone()),
        DEFAULT_NGINX_VERSION,
    );
    let mariadb = resolve_service(
        config.mariadb,
        requirements.and_then(|r| r.mariadb.clone()),
        DEFAULT_MARIADB_VERSION,
    );
    let opensearch = resolve_service(
        config.opensearch,
        requirements.and_then(|r| r.opensearch.clone()),
        DEFAULT_OPENSEARCH_VERSION,
    );
    let redis = resolve_service(
        config.redis,
        requirements.and_then(|r| r.redis.clone()),
        DEFAULT_REDIS_VERSION,
    );
    let rabbitmq = resolve_service(
        config.rabbitmq,
        requirements.and_then(|r| r.rabbitmq.clone()),
        DEFAULT_RABBITMQ_VERSION,
    );

    let swoole_override = config.swoole.unwrap_or_default();
    let swoole = ResolvedSwoole {
        enabled: swoole_override.enabled,
        port: if swoole_override.enabled {
            Some(
                swoole_override
                    .port
                    .filter(|port| *port != 0)
                    .unwrap_or(DEFAULT_SWOOLE_PORT),
            )
        } else {
            swoole_override.port
        },
    };

    Ok(ResolvedConfig {
        project: config.project,
        magento: config.magento,
        php,
        nginx,
        mariadb,
        opensearch,
        redis,
        rabbitmq,
        node: config.node.and_then(|node| node.version),
        swoole,
    })
}

/// Resolve one service override block: explicit version, then catalog value,
/// then fallback. The free-form configuration map rides through untouched.
fn resolve_service(
    service: Option<ServiceOverride>,
    catalog_version: Option<String>,
    fallback: &str,
) -> ResolvedService {
    let service = service.unwrap_or_default();
    ResolvedService {
        version: service
            .version
            .or(catalog_version)
            .unwrap_or_else(|| fallback.to_string()),
        configuration: service.configuration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SwooleOverride;

    fn catalog() -> VersionCatalog {
        VersionCatalog::from_entries([VersionRequirements {
            version: "2.4.7".to_string(),
            php: Some("8.3".to_string()),
            nginx: Some("1.26".to_string()),
            mariadb: Some("10.6".to_string()),
            opensearch: Some("2.12".to_string()),
            redis: Some("7.2".to_string()),
            rabbitmq: Some("3.13".to_string()),
        }])
    }

    #[test]
    fn test_empty_project_name_rejected_before_lookup() {
        // An unknown Magento version must not be reported when the project
        // name is already invalid.
        let config = ProjectConfig {
            magento: Some("9.9.9".to_string()),
            ..ProjectConfig::default()
        };
        let err = resolve(&catalog(), config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_unsupported_version_lists_known_versions() {
        let config = ProjectConfig::new("shop", Some("9.9.9".to_string()));
        let err = resolve(&catalog(), config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("9.9.9"));
        assert!(message.contains("2.4.7"));
    }

    #[test]
    fn test_catalog_versions_fill_empty_slots() {
        let config = ProjectConfig::new("shop", Some("2.4.7".to_string()));
        let resolved = resolve(&catalog(), config).unwrap();
        assert_eq!(resolved.php.version, "8.3");
        assert_eq!(resolved.nginx.version, "1.26");
        assert_eq!(resolved.mariadb.version, "10.6");
        assert_eq!(resolved.opensearch.version, "2.12");
        assert_eq!(resolved.redis.version, "7.2");
        assert_eq!(resolved.rabbitmq.version, "3.13");
    }

    #[test]
    fn test_swoole_disabled_gets_no_port() {
        let mut config = ProjectConfig::new("shop", None);
        config.swoole = Some(SwooleOverride {
            enabled: false,
            port: None,
        });
        let resolved = resolve(&catalog(), config).unwrap();
        assert!(!resolved.swoole_enabled());
        assert_eq!(resolved.swoole_port(), None);
    }

    #[test]
    fn test_swoole_enabled_defaults_port() {
        let mut config = ProjectConfig::new("shop", None);
        config.swoole = Some(SwooleOverride {
            enabled: true,
            port: None,
        });
        let resolved = resolve(&catalog(), config).unwrap();
        assert_eq!(resolved.swoole_port(), Some(DEFAULT_SWOOLE_PORT));
    }

    #[test]
    fn test_swoole_explicit_port_kept() {
        let mut config = ProjectConfig::new("shop", None);
        config.swoole = Some(SwooleOverride {
            enabled: true,
            port: Some(9600),
        });
        let resolved = resolve(&catalog(), config).unwrap();
        assert_eq!(resolved.swoole_port(), Some(9600));
    }

    #[test]
    fn test_empty_extension_list_treated_as_unset() {
        let mut config = ProjectConfig::new("shop", None);
        config.php = Some(crate::models::PhpOverride {
            version: None,
            extensions: Some(vec![]),
        });
        let resolved = resolve(&catalog(), config).unwrap();
        assert_eq!(resolved.php.extensions.len(), DEFAULT_PHP_EXTENSIONS.len());
    }
}
