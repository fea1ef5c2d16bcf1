//! Blast command implementation
//!
//! This module implements the `blast` command, which exports the recipient
//! level data of a single blast into `<dataset>.blast_<id>`.

use super::{exit_code_for, prepare_run};
use crate::core::export::BlastOutcome;
use crate::core::workspace::Workspace;
use crate::domain::BlastId;
use clap::Args;

/// Arguments for the blast command
#[derive(Args, Debug)]
pub struct BlastArgs {
    /// Sailthru blast id to export
    #[arg(long = "blast_id", visible_alias = "blast-id", value_name = "ID")]
    pub blast_id: BlastId,
}

impl BlastArgs {
    /// Execute the blast command
    pub async fn execute(&self, config_path: &str, dry_run: bool) -> anyhow::Result<i32> {
        tracing::info!(blast_id = %self.blast_id, "Starting blast command");

        let (config, coordinator) = match prepare_run(config_path, dry_run) {
            Ok(prepared) => prepared,
            Err(code) => return Ok(code),
        };

        let workspace = Workspace::create()?;
        let table = config
            .bigquery
            .qualified_table(&self.blast_id.table_name());

        println!("🚀 Exporting blast {}...", self.blast_id);

        match coordinator.export_blast(&self.blast_id, &workspace).await {
            Ok(BlastOutcome::Loaded { rows }) => {
                println!("✅ Loaded {rows} rows into {table}");
                Ok(0)
            }
            Ok(BlastOutcome::NoJob) => {
                println!(
                    "⚠️  Sailthru created no export job for blast {}, nothing loaded",
                    self.blast_id
                );
                Ok(0)
            }
            Err(e) => {
                tracing::error!(blast_id = %self.blast_id, error = %e, "Blast export failed");
                eprintln!("Blast export failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
