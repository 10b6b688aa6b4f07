//! Rendering the output tree from a resolved configuration.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use wharf_config::ResolvedConfig;

use crate::context::build_variables;
use crate::error::{RenderError, RenderResult};
use crate::templates::RENDER_PLAN;

/// Renderer for the `.wharf/` output tree.
pub struct ComposeRenderer {
    variable_pattern: Regex,
}

impl Default for ComposeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self {
            // Match {{variable_name}} pattern
            variable_pattern: Regex::new(r"\{\{([a-zA-Z_][a-zA-Z0-9_]*)\}\}")
                .expect("static pattern"),
        }
    }

    /// Render all output files for `config` into `output_dir`.
    ///
    /// Files are staged in a sibling temporary directory and moved into place
    /// only after every template rendered; an existing `output_dir` is
    /// replaced wholesale. Returns the set of written destination paths.
    pub fn render(
        &self,
        config: &ResolvedConfig,
        output_dir: &Path,
    ) -> RenderResult<BTreeSet<PathBuf>> {
        let vars = build_variables(config);

        let parent = output_dir.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent).map_err(|source| RenderError::Stage {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }
        let staging = tempfile::Builder::new()
            .prefix(".wharf-staging")
            .tempdir_in(parent.unwrap_or_else(|| Path::new(".")))
            .map_err(|source| RenderError::Stage {
                path: output_dir.to_path_buf(),
                source,
            })?;

        info!("Rendering environment for project '{}'", config.project);

        let mut written = BTreeSet::new();
        for (destination, template) in RENDER_PLAN {
            let final_path = output_dir.join(destination);
            let staged_path = staging.path().join(destination);

            if let Some(dir) = staged_path.parent() {
                fs::create_dir_all(dir).map_err(|source| RenderError::Io {
                    path: final_path.clone(),
                    source,
                })?;
            }

            let rendered = self.render_content(template, &vars, &final_path)?;
            fs::write(&staged_path, rendered).map_err(|source| RenderError::Io {
                path: final_path.clone(),
                source,
            })?;
            debug!("Rendered {:?}", final_path);
            written.insert(final_path);
        }

        // Swap the staged tree into place. The window between removal and
        // rename is the only non-atomic step; the staged tree is already
        // complete at this point.
        if output_dir.exists() {
            fs::remove_dir_all(output_dir).map_err(|source| RenderError::Stage {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }
        let staging = staging.into_path();
        fs::rename(&staging, output_dir).map_err(|source| RenderError::Stage {
            path: output_dir.to_path_buf(),
            source,
        })?;

        Ok(written)
    }

    /// Substitute `{{variable}}` occurrences in a template. An unresolved
    /// variable aborts the render with the destination path attached.
    fn render_content(
        &self,
        template: &str,
        vars: &BTreeMap<String, String>,
        destination: &Path,
    ) -> RenderResult<String> {
        let mut missing: Option<String> = None;
        let rendered = self
            .variable_pattern
            .replace_all(template, |caps: &regex::Captures| {
                match vars.get(&caps[1]) {
                    Some(value) => value.clone(),
                    None => {
                        missing.get_or_insert_with(|| caps[1].to_string());
                        String::new()
                    }
                }
            })
            .to_string();

        match missing {
            Some(variable) => Err(RenderError::UnknownVariable {
                path: destination.to_path_buf(),
                variable,
            }),
            None => Ok(rendered),
        }
    }
}
