//! Magento version detection from `composer.json`.
//!
//! Used by `wharf setup` when the project has no `wharf.yaml` yet: the
//! Magento metapackage requirement pins the platform version well enough to
//! seed an initial project file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Composer packages whose required version identifies the Magento release.
const MAGENTO_PACKAGES: &[&str] = &[
    "magento/product-community-edition",
    "magento/product-enterprise-edition",
];

/// Detect the Magento version from the project's `composer.json`.
pub fn detect_magento_version(project_dir: impl AsRef<Path>) -> ConfigResult<String> {
    let path = project_dir.as_ref().join("composer.json");
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let manifest: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
            path: path.clone(),
            source,
        })?;

    let require = manifest
        .get("require")
        .and_then(|r| r.as_object())
        .ok_or_else(|| {
            ConfigError::DetectionFailed("composer.json has no require section".to_string())
        })?;

    for package in MAGENTO_PACKAGES {
        if let Some(constraint) = require.get(*package).and_then(|v| v.as_str()) {
            let version = normalize_constraint(constraint);
            if !version.is_empty() {
                debug!("Detected Magento {} from {}", version, package);
                return Ok(version);
            }
        }
    }

    Err(ConfigError::DetectionFailed(
        "no Magento metapackage found in composer.json".to_string(),
    ))
}

/// Reduce a composer version constraint to a plain version string.
/// Takes the first version-looking token and strips constraint operators.
fn normalize_constraint(constraint: &str) -> String {
    constraint
        .split([' ', ',', '|'])
        .map(|token| token.trim_start_matches(['^', '~', '>', '<', '=', 'v']))
        .find(|token| token.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_composer(dir: &Path, body: &str) {
        fs::write(dir.join("composer.json"), body).unwrap();
    }

    #[test]
    fn test_detects_community_edition() {
        let dir = tempfile::tempdir().unwrap();
        write_composer(
            dir.path(),
            r#"{"require": {"magento/product-community-edition": "2.4.7"}}"#,
        );
        assert_eq!(detect_magento_version(dir.path()).unwrap(), "2.4.7");
    }

    #[test]
    fn test_strips_constraint_operators() {
        let dir = tempfile::tempdir().unwrap();
        write_composer(
            dir.path(),
            r#"{"require": {"magento/product-community-edition": ">=2.4.6 <2.5"}}"#,
        );
        assert_eq!(detect_magento_version(dir.path()).unwrap(), "2.4.6");
    }

    #[test]
    fn test_keeps_patch_suffix() {
        let dir = tempfile::tempdir().unwrap();
        write_composer(
            dir.path(),
            r#"{"require": {"magento/product-community-edition": "2.4.8-p5"}}"#,
        );
        assert_eq!(detect_magento_version(dir.path()).unwrap(), "2.4.8-p5");
    }

    #[test]
    fn test_missing_metapackage_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_composer(dir.path(), r#"{"require": {"php": "^8.3"}}"#);
        let err = detect_magento_version(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DetectionFailed(_)));
    }
}
