// Sluice - Sailthru to BigQuery ETL Tool
// Copyright (c) 2025 Sluice Contributors
// Licensed under the MIT License

use clap::Parser;
use sluice::cli::commands::{exit_code_for, EXIT_FATAL};
use sluice::cli::{Cli, Commands};
use sluice::config::load_config;
use sluice::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; the command
    // itself reports any configuration error.
    let file_config = load_config(&cli.config).ok();
    let log_level = cli.effective_log_level(
        file_config
            .as_ref()
            .map(|c| c.application.log_level.as_str()),
    );
    let logging_config = file_config.map(|c| c.logging).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code_for(&e));
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Sluice - Sailthru to BigQuery ETL Tool"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Blast(args) => args.execute(&cli.config, cli.dry_run).await,
        Commands::Campaigns(args) => args.execute(&cli.config, cli.dry_run).await,
        Commands::Export(args) => args.execute(&cli.config, cli.dry_run).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
