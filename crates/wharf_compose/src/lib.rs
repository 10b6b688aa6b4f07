//! # wharf_compose
//!
//! Deterministic rendering of the `.wharf/` output tree: the docker-compose
//! descriptor plus per-service configuration files, produced from a
//! [`wharf_config::ResolvedConfig`].
//!
//! Rendering is staged in a temporary directory and swapped into place only
//! on full success, so a mid-render failure never leaves a half-written
//! output directory. Rendering onto an existing target replaces it wholesale;
//! manual edits are not merged.

pub mod context;
pub mod error;
pub mod renderer;
mod templates;

pub use error::{RenderError, RenderResult};
pub use renderer::ComposeRenderer;
