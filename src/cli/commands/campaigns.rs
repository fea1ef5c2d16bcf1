//! Campaigns command implementation
//!
//! This module implements the `campaigns` command, which loads campaign
//! metadata for one status and date range into `<dataset>.campaigns`.

use super::{exit_code_for, prepare_run};
use crate::core::workspace::Workspace;
use crate::domain::CampaignStatus;
use clap::Args;

/// Arguments for the campaigns command
#[derive(Args, Debug)]
pub struct CampaignsArgs {
    /// Campaign status to report on
    #[arg(long, value_enum)]
    pub status: CampaignStatus,

    /// Start of the range, e.g. "January 1 2017"
    #[arg(long = "start_date", visible_alias = "start-date", value_name = "DATE")]
    pub start_date: String,

    /// End of the range, e.g. "January 13 2017"
    #[arg(long = "end_date", visible_alias = "end-date", value_name = "DATE")]
    pub end_date: String,
}

impl CampaignsArgs {
    /// Execute the campaigns command
    pub async fn execute(&self, config_path: &str, dry_run: bool) -> anyhow::Result<i32> {
        tracing::info!(
            status = %self.status,
            start_date = %self.start_date,
            end_date = %self.end_date,
            "Starting campaigns command"
        );

        let (_, coordinator) = match prepare_run(config_path, dry_run) {
            Ok(prepared) => prepared,
            Err(code) => return Ok(code),
        };

        let workspace = Workspace::create()?;

        let report = match coordinator
            .export_campaigns(self.status, &self.start_date, &self.end_date, &workspace)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Campaign export failed");
                eprintln!("Campaign export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!();
        println!("📊 Campaign Report:");
        println!("  Status: {}", self.status);
        println!("  Campaigns exported: {}", report.records);
        println!("  Recent blasts: {}", report.recent_blasts.len());
        println!();
        println!("✅ Campaign export completed!");

        Ok(0)
    }
}
