//! # wharf_catalog
//!
//! Bundled Magento version requirements for wharf.
//!
//! Each supported Magento release maps to a fixed tuple of dependent-service
//! versions (PHP, Nginx, MariaDB, OpenSearch, Redis, RabbitMQ). The catalog is
//! loaded once at startup from data shipped with the binary and is read-only
//! for the rest of the process lifetime, so it can be shared freely.

pub mod catalog;
pub mod error;

pub use catalog::{VersionCatalog, VersionRequirements};
pub use error::{CatalogError, CatalogResult};
