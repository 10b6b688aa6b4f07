//! # wharf_config
//!
//! Project configuration for wharf: the `wharf.yaml` model, the defaulting
//! cascade that turns a partial user configuration into a fully-resolved one,
//! and helpers for creating and detecting project files.
//!
//! Resolution precedence, strongest first:
//!
//! 1. an explicit value in `wharf.yaml`
//! 2. the value implied by the selected Magento version (catalog lookup)
//! 3. a hard-coded fallback constant
//!
//! Resolution is a pure function of the input and the catalog: no clock, no
//! randomness, no filesystem access.

pub mod detect;
pub mod error;
pub mod loader;
pub mod models;
pub mod resolver;

pub use error::{ConfigError, ConfigResult};
pub use models::{
    NodeOverride, PhpOverride, ProjectConfig, ResolvedConfig, ResolvedPhp, ResolvedService,
    ResolvedSwoole, ServiceOverride, SwooleOverride, WHARF_FILE,
};
pub use resolver::resolve;
