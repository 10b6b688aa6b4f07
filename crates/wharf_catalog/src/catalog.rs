//! Lookup table from Magento version to dependent-service versions.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Bundled version records, one YAML document per supported Magento release.
const BUNDLED_RECORDS: &[(&str, &str)] = &[
    ("2.4.4", include_str!("../versions/2.4.4.yaml")),
    ("2.4.5", include_str!("../versions/2.4.5.yaml")),
    ("2.4.6", include_str!("../versions/2.4.6.yaml")),
    ("2.4.7", include_str!("../versions/2.4.7.yaml")),
    ("2.4.8", include_str!("../versions/2.4.8.yaml")),
];

/// Service version tuple for one Magento release.
///
/// A `None` entry means the record does not pin that service; the resolver
/// falls through to its fallback constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirements {
    pub version: String,
    pub php: Option<String>,
    pub nginx: Option<String>,
    pub mariadb: Option<String>,
    pub opensearch: Option<String>,
    pub redis: Option<String>,
    pub rabbitmq: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceVersion {
    version: String,
}

#[derive(Debug, Deserialize)]
struct VersionRecord {
    version: String,
    php: Option<ServiceVersion>,
    nginx: Option<ServiceVersion>,
    mariadb: Option<ServiceVersion>,
    opensearch: Option<ServiceVersion>,
    redis: Option<ServiceVersion>,
    rabbitmq: Option<ServiceVersion>,
}

impl From<VersionRecord> for VersionRequirements {
    fn from(record: VersionRecord) -> Self {
        Self {
            version: record.version,
            php: record.php.map(|s| s.version),
            nginx: record.nginx.map(|s| s.version),
            mariadb: record.mariadb.map(|s| s.version),
            opensearch: record.opensearch.map(|s| s.version),
            redis: record.redis.map(|s| s.version),
            rabbitmq: record.rabbitmq.map(|s| s.version),
        }
    }
}

/// Read-only mapping from Magento version to its service requirements.
///
/// Constructed once and passed to the resolver by reference; never mutated.
#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    entries: BTreeMap<String, VersionRequirements>,
}

impl VersionCatalog {
    /// Load the catalog bundled with the binary.
    ///
    /// A malformed bundled record is a fatal error: the data ships inside the
    /// binary, so a parse failure is a build defect rather than a runtime
    /// condition to degrade around.
    pub fn bundled() -> CatalogResult<Self> {
        let mut entries = BTreeMap::new();
        for (name, raw) in BUNDLED_RECORDS {
            let record: VersionRecord =
                serde_yaml::from_str(raw).map_err(|source| CatalogError::InvalidRecord {
                    name: (*name).to_string(),
                    source,
                })?;
            if record.version.is_empty() {
                return Err(CatalogError::EmptyVersion {
                    name: (*name).to_string(),
                });
            }
            let requirements = VersionRequirements::from(record);
            entries.insert(requirements.version.clone(), requirements);
        }
        debug!("Loaded {} bundled Magento version records", entries.len());
        Ok(Self { entries })
    }

    /// Build a catalog from explicit entries. Used by tests and callers that
    /// need synthetic data.
    pub fn from_entries(entries: impl IntoIterator<Item = VersionRequirements>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|req| (req.version.clone(), req))
                .collect(),
        }
    }

    /// Look up the requirements for a Magento version.
    ///
    /// Tries an exact match first, then retries with any patch suffix
    /// stripped ("2.4.8-p5" falls back to "2.4.8").
    pub fn lookup(&self, version: &str) -> Option<&VersionRequirements> {
        if let Some(req) = self.entries.get(version) {
            return Some(req);
        }
        let base = base_version(version);
        if base != version {
            return self.entries.get(base);
        }
        None
    }

    /// All supported versions, sorted for deterministic error messages.
    pub fn supported_versions(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// The newest supported version by numeric component comparison.
    pub fn latest(&self) -> Option<&str> {
        self.entries
            .keys()
            .max_by(|a, b| compare_versions(a, b))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Strip a patch suffix from a version string ("2.4.8-p3" -> "2.4.8").
fn base_version(version: &str) -> &str {
    match version.find("-p") {
        Some(idx) if idx > 0 => &version[..idx],
        _ => version,
    }
}

/// Compare two dotted version strings numerically, component by component.
/// Non-numeric components fall back to string order.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split(['.', '-']);
    let mut right = b.split(['.', '-']);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str, php: &str) -> VersionRequirements {
        VersionRequirements {
            version: version.to_string(),
            php: Some(php.to_string()),
            nginx: Some("1.26".to_string()),
            mariadb: Some("10.6".to_string()),
            opensearch: Some("2.12".to_string()),
            redis: Some("7.2".to_string()),
            rabbitmq: Some("3.13".to_string()),
        }
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = VersionCatalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        let req = catalog.lookup("2.4.7").unwrap();
        assert_eq!(req.php.as_deref(), Some("8.3"));
    }

    #[test]
    fn test_exact_lookup() {
        let catalog = VersionCatalog::from_entries([entry("2.4.7", "8.3")]);
        assert!(catalog.lookup("2.4.7").is_some());
        assert!(catalog.lookup("9.9.9").is_none());
    }

    #[test]
    fn test_patch_suffix_falls_back_to_base() {
        let catalog = VersionCatalog::from_entries([entry("2.4.8", "8.4")]);
        let req = catalog.lookup("2.4.8-p5").unwrap();
        assert_eq!(req.version, "2.4.8");
    }

    #[test]
    fn test_exact_patch_entry_wins_over_base() {
        let catalog =
            VersionCatalog::from_entries([entry("2.4.8", "8.3"), entry("2.4.8-p5", "8.4")]);
        let req = catalog.lookup("2.4.8-p5").unwrap();
        assert_eq!(req.php.as_deref(), Some("8.4"));
    }

    #[test]
    fn test_supported_versions_sorted() {
        let catalog = VersionCatalog::from_entries([
            entry("2.4.7", "8.3"),
            entry("2.4.4", "8.1"),
            entry("2.4.6", "8.2"),
        ]);
        assert_eq!(catalog.supported_versions(), vec!["2.4.4", "2.4.6", "2.4.7"]);
    }

    #[test]
    fn test_latest_uses_numeric_order() {
        // Lexicographic order would pick "2.4.9" over "2.4.10".
        let catalog = VersionCatalog::from_entries([entry("2.4.9", "8.3"), entry("2.4.10", "8.4")]);
        assert_eq!(catalog.latest(), Some("2.4.10"));
    }

    #[test]
    fn test_latest_of_empty_catalog() {
        let catalog = VersionCatalog::default();
        assert_eq!(catalog.latest(), None);
    }
}
