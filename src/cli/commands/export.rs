//! Export command implementation
//!
//! This module implements the `export` command, the daily run: sent campaigns
//! from the configured start date through today, then every recent blast.

use super::{exit_code_for, prepare_run};
use crate::core::workspace::Workspace;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str, dry_run: bool) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let (_, coordinator) = match prepare_run(config_path, dry_run) {
            Ok(prepared) => prepared,
            Err(code) => return Ok(code),
        };

        let workspace = Workspace::create()?;
        let today = chrono::Local::now().date_naive();

        println!("🚀 Starting daily export...");
        println!();

        let summary = match coordinator.run_daily(today, &workspace).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!();
        println!("📊 Export Summary:");
        println!("  Campaigns exported: {}", summary.campaigns_exported);
        println!("  Recent blasts: {}", summary.recent_blasts);
        println!("  Blasts loaded: {}", summary.blasts_loaded);
        println!("  Blasts without export job: {}", summary.blasts_skipped);
        println!("  Rows loaded: {}", summary.rows_loaded);
        println!("  Failed: {}", summary.failures.len());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if summary.is_successful() {
            println!("✅ Export completed successfully!");
            Ok(0)
        } else {
            println!("⚠️  Export completed with failures:");
            for failure in &summary.failures {
                println!("  - blast {}: {}", failure.blast_id, failure.message);
            }
            println!();
            Ok(1)
        }
    }
}
