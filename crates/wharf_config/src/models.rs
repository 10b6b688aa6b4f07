//! Data models for project configuration.
//!
//! `ProjectConfig` is the partially-specified form parsed from `wharf.yaml`:
//! every field the user may omit is an explicit `Option`, so "omitted" and
//! "set" are structurally distinct. `ResolvedConfig` is the fully-populated
//! form produced by the resolver and is the only input the renderer accepts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the project file read from the project root.
pub const WHARF_FILE: &str = "wharf.yaml";

/// Free-form per-service configuration values carried through resolution
/// untouched. A `BTreeMap` keeps iteration order deterministic.
pub type ConfigurationMap = BTreeMap<String, serde_yaml::Value>;

/// User-facing project configuration as parsed from `wharf.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name; namespaces all generated resources and the local domain.
    #[serde(default)]
    pub project: String,

    /// Magento version driving catalog-derived service defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magento: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php: Option<PhpOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nginx: Option<ServiceOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mariadb: Option<ServiceOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opensearch: Option<ServiceOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis: Option<ServiceOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rabbitmq: Option<ServiceOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swoole: Option<SwooleOverride>,
}

impl ProjectConfig {
    /// Minimal configuration as written by `wharf setup` for a fresh project.
    pub fn new(project: impl Into<String>, magento: Option<String>) -> Self {
        Self {
            project: project.into(),
            magento,
            ..Self::default()
        }
    }
}

/// Per-service override block: an optional version pin plus a free-form
/// configuration map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub configuration: ConfigurationMap,
}

/// PHP override block: version pin plus the extension list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhpOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

/// Node.js override block. Node tooling is enabled iff a version is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Swoole override block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwooleOverride {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Fully-resolved configuration: every recognized service has a concrete
/// version. Produced only by [`crate::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub project: String,
    pub magento: Option<String>,
    pub php: ResolvedPhp,
    pub nginx: ResolvedService,
    pub mariadb: ResolvedService,
    pub opensearch: ResolvedService,
    pub redis: ResolvedService,
    pub rabbitmq: ResolvedService,
    /// Node.js version, when enabled.
    pub node: Option<String>,
    pub swoole: ResolvedSwoole,
}

/// Resolved per-service settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedService {
    pub version: String,
    pub configuration: ConfigurationMap,
}

/// Resolved PHP settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPhp {
    pub version: String,
    pub extensions: Vec<String>,
}

/// Resolved Swoole settings. `port` is always set when `enabled` is true.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSwoole {
    pub enabled: bool,
    pub port: Option<u16>,
}

impl ResolvedConfig {
    /// Local domain the site is served on.
    pub fn domain(&self) -> String {
        format!("{}.test", self.project)
    }

    /// Subdomain the Swoole API is routed to, when enabled.
    pub fn api_domain(&self) -> String {
        format!("api.{}.test", self.project)
    }

    /// Orchestration-visible resource name for a service.
    pub fn container_name(&self, service: &str) -> String {
        format!("{}_{}", self.project, service)
    }

    pub fn swoole_enabled(&self) -> bool {
        self.swoole.enabled
    }

    /// Swoole port when the toggle is enabled.
    pub fn swoole_port(&self) -> Option<u16> {
        if self.swoole.enabled {
            self.swoole.port
        } else {
            None
        }
    }
}

impl From<ResolvedService> for ServiceOverride {
    fn from(service: ResolvedService) -> Self {
        Self {
            version: Some(service.version),
            configuration: service.configuration,
        }
    }
}

/// A resolved configuration viewed back as a project configuration. Feeding
/// it through the resolver again yields an identical result: every slot is
/// already filled, so neither cascade phase has anything left to do.
impl From<ResolvedConfig> for ProjectConfig {
    fn from(resolved: ResolvedConfig) -> Self {
        Self {
            project: resolved.project,
            magento: resolved.magento,
            php: Some(PhpOverride {
                version: Some(resolved.php.version),
                extensions: Some(resolved.php.extensions),
            }),
            nginx: Some(resolved.nginx.into()),
            mariadb: Some(resolved.mariadb.into()),
            opensearch: Some(resolved.opensearch.into()),
            redis: Some(resolved.redis.into()),
            rabbitmq: Some(resolved.rabbitmq.into()),
            node: resolved.node.map(|version| NodeOverride {
                version: Some(version),
            }),
            swoole: Some(SwooleOverride {
                enabled: resolved.swoole.enabled,
                port: resolved.swoole.port,
            }),
        }
    }
}
