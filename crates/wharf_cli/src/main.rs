//! Wharf CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 3: Configuration or resolution error
//! - 4: Template rendering error
//! - 5: Engine or precondition error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands, PreconditionError};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const CONFIG_ERROR: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const ENGINE_ERROR: u8 = 5;
}

/// Default log directive, raised to debug by `--verbose`.
fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        "wharf=debug"
    } else {
        "wharf=info"
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_directive(cli.verbose).parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Setup(args) => commands::setup::execute(args).await,
        Commands::Start(args) => commands::start::execute(args).await,
        Commands::Stop(args) => commands::stop::execute(args).await,
        Commands::Magento(args) => commands::magento::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code. Downcasting walks the whole
/// context chain, so wrapped errors still land in the right bucket.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<wharf_config::ConfigError>().is_some()
        || e.downcast_ref::<wharf_catalog::CatalogError>().is_some()
    {
        ExitCodes::CONFIG_ERROR
    } else if e.downcast_ref::<wharf_compose::RenderError>().is_some() {
        ExitCodes::TEMPLATE_ERROR
    } else if e.downcast_ref::<wharf_engine::EngineError>().is_some()
        || e.downcast_ref::<PreconditionError>().is_some()
    {
        ExitCodes::ENGINE_ERROR
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
