//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Sluice configuration file.

use super::EXIT_CONFIG;
use crate::config::{load_config, SluiceConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        for line in summary_lines(&config) {
            println!("{line}");
        }
        println!();
        Ok(0)
    }
}

/// Human-readable configuration summary; secrets are never included
fn summary_lines(config: &SluiceConfig) -> Vec<String> {
    let poll = &config.sailthru.poll;
    let bq = &config.bigquery;
    let export = &config.export;

    vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Dry Run: {}", config.application.dry_run),
        format!("  Sailthru API: {}", config.sailthru.base_url),
        format!("  Request Timeout: {}s", config.sailthru.timeout_seconds),
        format!(
            "  Job Polling: every {}s x{} (max {}s), {} checks",
            poll.interval_seconds,
            poll.backoff_multiplier,
            poll.max_interval_seconds,
            poll.max_attempts
        ),
        format!("  BigQuery Project: {}", bq.project),
        format!("  BigQuery Dataset: {}", bq.dataset),
        format!("  Campaign Schema: {}", bq.campaign_schema),
        format!("  Blast Schema: {}", bq.blast_schema),
        format!(
            "  bq Binary: {}",
            bq.bq_binary.as_deref().unwrap_or("(from PATH)")
        ),
        format!("  Daily Start Date: {}", export.daily_start_date),
        format!("  Recent Window: {} days", export.recent_window_days),
        format!("  Fail Fast: {}", export.fail_fast),
        format!("  Campaigns Write Mode: {:?}", export.campaigns_write_mode),
        format!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!(
                    "{} ({})",
                    config.logging.local_path, config.logging.local_rotation
                )
            } else {
                "disabled".to_string()
            }
        ),
    ]
}
