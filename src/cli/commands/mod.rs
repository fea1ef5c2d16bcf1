//! CLI command implementations
//!
//! Every command returns the process exit code:
//! 0 success, 1 daily export with failed blasts, 2 configuration or input
//! error, 5 fatal error.

pub mod blast;
pub mod campaigns;
pub mod export;
pub mod init;
pub mod validate;

use crate::config::{load_config, SluiceConfig};
use crate::core::export::ExportCoordinator;
use crate::domain::SluiceError;

/// Exit code for a configuration or input error
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for a fatal error
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error that ended a command
pub fn exit_code_for(error: &SluiceError) -> i32 {
    match error {
        SluiceError::Configuration(_) | SluiceError::Validation(_) => EXIT_CONFIG,
        _ => EXIT_FATAL,
    }
}

/// Loads the configuration and builds the coordinator for a run
///
/// Errors are reported to the user and turned into an exit code.
pub(crate) fn prepare_run(
    config_path: &str,
    dry_run: bool,
) -> Result<(SluiceConfig, ExportCoordinator), i32> {
    let config = load_config(config_path).map_err(|e| {
        tracing::error!(error = %e, config_path, "Failed to load configuration");
        eprintln!("❌ {e}");
        exit_code_for(&e)
    })?;

    let dry_run = dry_run || config.application.dry_run;
    if dry_run {
        tracing::info!("Dry run mode enabled - BigQuery loads will be skipped");
        println!("🔍 DRY RUN MODE - No data will be loaded into BigQuery");
        println!();
    }

    let coordinator = ExportCoordinator::from_config(&config, dry_run).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize export");
        eprintln!("Failed to initialize export: {e}");
        exit_code_for(&e)
    })?;

    Ok((config, coordinator))
}
