//! Export coordinator - main orchestrator for the export process
//!
//! Wires the Sailthru client and the BigQuery loader into the two pipelines
//! and runs them in the three modes the CLI exposes.

use crate::adapters::bigquery::{BqCliLoader, WarehouseLoader};
use crate::adapters::sailthru::{SailthruApi, SailthruClient};
use crate::config::{ExportConfig, SluiceConfig};
use crate::core::export::blast::{BlastExporter, BlastOutcome};
use crate::core::export::campaigns::{CampaignReport, CampaignReporter};
use crate::core::export::summary::{BlastFailure, ExportSummary};
use crate::core::workspace::Workspace;
use crate::domain::campaign::format_report_date;
use crate::domain::{BlastId, CampaignStatus, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    blasts: BlastExporter,
    campaigns: CampaignReporter,
    export: ExportConfig,
}

impl ExportCoordinator {
    /// Create a coordinator over explicit adapters
    pub fn new(
        config: &SluiceConfig,
        api: Arc<dyn SailthruApi>,
        loader: Arc<dyn WarehouseLoader>,
    ) -> Self {
        let blasts = BlastExporter::new(
            api.clone(),
            loader.clone(),
            config.sailthru.poll.clone(),
            config.bigquery.clone(),
        );
        let campaigns = CampaignReporter::new(
            api,
            loader,
            config.bigquery.clone(),
            config.export.recent_window_days,
            config.export.campaigns_write_mode,
        );

        Self {
            blasts,
            campaigns,
            export: config.export.clone(),
        }
    }

    /// Create a coordinator backed by the real Sailthru API and `bq` CLI
    pub fn from_config(config: &SluiceConfig, dry_run: bool) -> Result<Self> {
        let api = Arc::new(SailthruClient::new(&config.sailthru)?);
        let loader = Arc::new(BqCliLoader::from_config(&config.bigquery, dry_run)?);
        Ok(Self::new(config, api, loader))
    }

    /// Export a single blast
    pub async fn export_blast(
        &self,
        blast_id: &BlastId,
        workspace: &Workspace,
    ) -> Result<BlastOutcome> {
        self.blasts.export(blast_id, workspace).await
    }

    /// Run the campaign report once; the recent set is only reported
    pub async fn export_campaigns(
        &self,
        status: CampaignStatus,
        start_date: &str,
        end_date: &str,
        workspace: &Workspace,
    ) -> Result<CampaignReport> {
        self.campaigns
            .export(status, start_date, end_date, workspace)
            .await
    }

    /// Execute the daily export
    ///
    /// Sent campaigns from `export.daily_start_date` through `today` are
    /// loaded first; a failure there aborts the run. Each recent blast is then
    /// exported in order. A failed blast is recorded in the summary and the
    /// run continues, unless `export.fail_fast` is set.
    pub async fn run_daily(&self, today: NaiveDate, workspace: &Workspace) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        let end_date = format_report_date(today);

        tracing::info!(
            start_date = %self.export.daily_start_date,
            end_date = %end_date,
            "Starting daily export"
        );

        let report = self
            .campaigns
            .export(
                CampaignStatus::Sent,
                &self.export.daily_start_date,
                &end_date,
                workspace,
            )
            .await?;

        summary.campaigns_exported = report.records;
        summary.recent_blasts = report.recent_blasts.len();

        for blast_id in &report.recent_blasts {
            match self.blasts.export(blast_id, workspace).await {
                Ok(outcome) => summary.record_outcome(&outcome),
                Err(e) if self.export.fail_fast => {
                    tracing::error!(blast_id = %blast_id, error = %e, "Blast export failed, aborting");
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(blast_id = %blast_id, error = %e, "Blast export failed");
                    summary.add_failure(BlastFailure::new(blast_id.clone(), e.to_string()));
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}
