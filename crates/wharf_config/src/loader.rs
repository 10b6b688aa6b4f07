//! Reading and writing `wharf.yaml`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::models::ProjectConfig;

/// Header written at the top of generated project files.
const GENERATED_HEADER: &str = "# Wharf - Magento 2 Development Environment\n\
                                # Auto-generated configuration file\n\n";

/// Load a project configuration from `wharf.yaml`.
///
/// Parsing only; callers run the result through [`crate::resolve`].
pub fn load(path: impl AsRef<Path>) -> ConfigResult<ProjectConfig> {
    let path = path.as_ref();
    debug!("Loading project configuration from {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ProjectConfig =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config)
}

/// Write a minimal `wharf.yaml` for a fresh project.
pub fn write_initial(
    path: impl AsRef<Path>,
    project: &str,
    magento: Option<String>,
) -> ConfigResult<()> {
    let path = path.as_ref();
    let config = ProjectConfig::new(project, magento);

    let body = serde_yaml::to_string(&config)?;
    let content = format!("{GENERATED_HEADER}{body}");

    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote initial project configuration to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wharf.yaml");

        write_initial(&path, "shop", Some("2.4.7".to_string())).unwrap();
        let config = load(&path).unwrap();

        assert_eq!(config.project, "shop");
        assert_eq!(config.magento.as_deref(), Some("2.4.7"));
        assert!(config.php.is_none());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wharf.yaml");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("wharf.yaml"));
    }

    #[test]
    fn test_initial_file_carries_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wharf.yaml");
        write_initial(&path, "shop", None).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Wharf"));
    }
}
