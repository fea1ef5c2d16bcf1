//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `sluice init`
pub const SAMPLE_CONFIG: &str = r#"# Sluice Configuration File
# Sailthru to BigQuery ETL Tool

[application]
log_level = "info"  # trace | debug | info | warn | error
dry_run = false

[sailthru]
base_url = "https://api.sailthru.com"
api_key = "${SAILTHRU_API_KEY}"
api_secret = "${SAILTHRU_API_SECRET}"
timeout_seconds = 60

# Export job polling: first check immediately, then back off
[sailthru.poll]
interval_seconds = 5
backoff_multiplier = 1.5
max_interval_seconds = 60
max_attempts = 120

[bigquery]
project = "my-gcp-project"
dataset = "sailthru_blasts"
campaign_schema = "schemas/sailthru_campaign_export_schema.json"
blast_schema = "schemas/sailthru_blast_export_schema.json"
# bq_binary = "/usr/bin/bq"

[export]
daily_start_date = "January 1 2010"
recent_window_days = 7
fail_fast = false
campaigns_write_mode = "append"  # append | replace

[logging]
local_enabled = false
local_path = "/var/log/sluice"
local_rotation = "daily"  # daily | hourly | never
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "sluice.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Sluice configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your BigQuery project", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set SAILTHRU_API_KEY and SAILTHRU_API_SECRET");
                println!("  3. Make sure the bq CLI is installed and authenticated");
                println!("  4. Validate configuration: sluice validate-config");
                println!("  5. Run the daily export: sluice export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
