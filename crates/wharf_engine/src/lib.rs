//! # wharf_engine
//!
//! The collaborator layer: thin wrappers around the external orchestration
//! CLI (`docker compose`) and certificate CLI (`openssl`), plus the one-shot
//! bootstrap of the shared Traefik reverse proxy with TLS termination for
//! `*.test` domains.
//!
//! Nothing here holds internal state; every call is a synchronous-in-effect
//! process invocation that inherits this process's lifetime. A missing
//! external binary is a fatal precondition failure, not something to recover
//! from or retry.

pub mod compose;
pub mod error;
pub mod traefik;

pub use compose::{compose_down, compose_up, container_running, exec_magento};
pub use error::{EngineError, EngineResult};
