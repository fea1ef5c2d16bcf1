//! Campaign report pipeline
//!
//! Fetches campaign metadata for a status and date range, works out which
//! blasts started recently, and loads the records into `<dataset>.campaigns`.

use crate::adapters::bigquery::{LoadRequest, SourceFormat, WarehouseLoader, WriteMode};
use crate::adapters::sailthru::SailthruApi;
use crate::config::{BigQueryConfig, CampaignsWriteMode};
use crate::core::transform::write_ndjson;
use crate::core::workspace::Workspace;
use crate::domain::campaign::{parse_report_date, recent_cutoff};
use crate::domain::{BlastId, CampaignRecord, CampaignStatus, Result, SluiceError};
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

const CAMPAIGNS_TABLE: &str = "campaigns";

/// Result of one campaign report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignReport {
    /// Number of campaign records exported
    pub records: usize,
    /// Blasts whose start time falls inside the recent window
    pub recent_blasts: BTreeSet<BlastId>,
}

/// Exports campaign metadata into BigQuery
pub struct CampaignReporter {
    api: Arc<dyn SailthruApi>,
    loader: Arc<dyn WarehouseLoader>,
    bigquery: BigQueryConfig,
    recent_window_days: u32,
    write_mode: WriteMode,
}

impl CampaignReporter {
    pub fn new(
        api: Arc<dyn SailthruApi>,
        loader: Arc<dyn WarehouseLoader>,
        bigquery: BigQueryConfig,
        recent_window_days: u32,
        write_mode: CampaignsWriteMode,
    ) -> Self {
        let write_mode = match write_mode {
            CampaignsWriteMode::Append => WriteMode::Append,
            CampaignsWriteMode::Replace => WriteMode::Replace,
        };
        Self {
            api,
            loader,
            bigquery,
            recent_window_days,
            write_mode,
        }
    }

    /// Runs the report for `status` between two human dates (`January 13 2017`)
    ///
    /// `end_date` is validated before any request since the recent window is
    /// computed from it. Every `start_time` is parsed before the file is
    /// written, so a malformed record aborts the run with nothing loaded.
    pub async fn export(
        &self,
        status: CampaignStatus,
        start_date: &str,
        end_date: &str,
        workspace: &Workspace,
    ) -> Result<CampaignReport> {
        let end = parse_report_date(end_date)?;
        let cutoff = recent_cutoff(end, self.recent_window_days)?;

        tracing::info!(
            status = %status,
            start_date,
            end_date,
            "Requesting campaign report"
        );

        let body = self
            .api
            .get(
                "blast",
                &json!({
                    "status": status.as_str(),
                    "start_date": start_date,
                    "end_date": end_date,
                }),
            )
            .await?;

        let records = records_from_body(body)?;
        let recent_blasts = select_recent(&records, cutoff)?;

        tracing::info!(
            records = records.len(),
            recent = recent_blasts.len(),
            cutoff = %cutoff,
            "Campaign report received"
        );
        tracing::debug!(recent_blasts = ?recent_blasts, "Recent blasts");

        let path = workspace.campaigns_export_path();
        let mut writer = BufWriter::new(File::create(&path)?);
        write_ndjson(&mut writer, &records)?;
        writer.flush()?;

        // An empty replace still runs so the table stops holding the previous report.
        if records.is_empty() && self.write_mode == WriteMode::Append {
            tracing::info!("No campaigns returned, skipping load");
        } else {
            let request = self.load_request(path);
            self.loader.load(&request).await?;
            tracing::info!(
                table = %request.table,
                records = records.len(),
                "Campaign report loaded"
            );
        }

        Ok(CampaignReport {
            records: records.len(),
            recent_blasts,
        })
    }

    fn load_request(&self, source: PathBuf) -> LoadRequest {
        LoadRequest {
            table: self.bigquery.qualified_table(CAMPAIGNS_TABLE),
            source,
            schema: PathBuf::from(&self.bigquery.campaign_schema),
            format: SourceFormat::NewlineDelimitedJson,
            skip_leading_rows: 0,
            write_mode: self.write_mode,
        }
    }
}

/// Blast ids of records starting at or after `cutoff`
///
/// Fails on the first record whose `start_time` cannot be parsed.
pub fn select_recent(
    records: &[CampaignRecord],
    cutoff: NaiveDateTime,
) -> Result<BTreeSet<BlastId>> {
    let mut recent = BTreeSet::new();
    for record in records {
        if record.start_time()? >= cutoff {
            recent.insert(record.blast_id()?);
        }
    }
    Ok(recent)
}

fn records_from_body(body: Value) -> Result<Vec<CampaignRecord>> {
    match body {
        Value::Object(mut fields) => match fields.remove("blasts") {
            Some(Value::Array(items)) => items.into_iter().map(CampaignRecord::from_value).collect(),
            None | Some(Value::Null) => {
                tracing::warn!("Campaign report has no 'blasts' list, treating as empty");
                Ok(Vec::new())
            }
            Some(other) => Err(SluiceError::InvalidResponse(format!(
                "'blasts' should be a list, got {other}"
            ))),
        },
        other => Err(SluiceError::InvalidResponse(format!(
            "campaign report should be an object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::fakes::{RecordingLoader, ScriptedApi};
    use chrono::NaiveDate;

    fn bigquery() -> BigQueryConfig {
        BigQueryConfig {
            project: "analytics-prod".to_string(),
            dataset: "sailthru_blasts".to_string(),
            campaign_schema: "schemas/campaign.json".to_string(),
            blast_schema: "schemas/blast.json".to_string(),
            bq_binary: None,
        }
    }

    fn reporter(api: &Arc<ScriptedApi>, loader: &Arc<RecordingLoader>) -> CampaignReporter {
        CampaignReporter::new(
            api.clone(),
            loader.clone(),
            bigquery(),
            7,
            CampaignsWriteMode::Append,
        )
    }

    fn record(blast_id: i64, start_time: &str) -> Value {
        json!({"blast_id": blast_id, "name": format!("Campaign {blast_id}"), "start_time": start_time})
    }

    fn ids(set: &BTreeSet<BlastId>) -> Vec<&str> {
        set.iter().map(BlastId::as_str).collect()
    }

    #[tokio::test]
    async fn test_report_selects_recent_and_loads() {
        let api = Arc::new(ScriptedApi::new().respond(json!({
            "blasts": [
                record(1, "Sun, 01 Jan 2017 10:00:00 -0500"),
                record(2, "Sun, 08 Jan 2017 10:00:00 -0500"),
                record(3, "Fri, 06 Jan 2017 00:00:00 +0000"),
            ]
        })));
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        let report = reporter(&api, &loader)
            .export(CampaignStatus::Sent, "January 1 2017", "January 13 2017", &ws)
            .await
            .unwrap();

        assert_eq!(report.records, 3);
        assert_eq!(ids(&report.recent_blasts), vec!["2", "3"]);

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].action, "blast");
        assert_eq!(
            calls[0].params,
            json!({"status": "sent", "start_date": "January 1 2017", "end_date": "January 13 2017"})
        );

        let loads = loader.loads();
        assert_eq!(loads.len(), 1);
        let (request, contents) = &loads[0];
        assert_eq!(request.table, "sailthru_blasts.campaigns");
        assert_eq!(request.format, SourceFormat::NewlineDelimitedJson);
        assert_eq!(request.write_mode, WriteMode::Append);
        assert_eq!(request.skip_leading_rows, 0);
        assert_eq!(contents.matches('\n').count(), 2);
        assert!(!contents.ends_with('\n'));
        assert!(contents.starts_with("{\"blast_id\":1,"));
    }

    #[tokio::test]
    async fn test_malformed_start_time_aborts_without_load() {
        let api = Arc::new(ScriptedApi::new().respond(json!({
            "blasts": [
                record(1, "Sun, 08 Jan 2017 10:00:00 -0500"),
                record(2, "2017-01-08T10:00:00Z"),
            ]
        })));
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        let err = reporter(&api, &loader)
            .export(CampaignStatus::Sent, "January 1 2017", "January 13 2017", &ws)
            .await
            .unwrap_err();

        assert!(matches!(err, SluiceError::Timestamp(_)));
        assert!(loader.loads().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_end_date_makes_no_request() {
        let api = Arc::new(ScriptedApi::new());
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        let err = reporter(&api, &loader)
            .export(CampaignStatus::Draft, "January 1 2017", "2017-01-13", &ws)
            .await
            .unwrap_err();

        assert!(matches!(err, SluiceError::Validation(_)));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_blasts_key_skips_load() {
        let api = Arc::new(ScriptedApi::new().respond(json!({})));
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        let report = reporter(&api, &loader)
            .export(CampaignStatus::Scheduled, "January 1 2017", "January 13 2017", &ws)
            .await
            .unwrap();

        assert_eq!(report.records, 0);
        assert!(report.recent_blasts.is_empty());
        assert!(loader.loads().is_empty());
    }

    #[tokio::test]
    async fn test_api_error_aborts() {
        let api = Arc::new(ScriptedApi::new().fail(
            crate::domain::ApiError::new(401, Some(2), "Invalid API key").into(),
        ));
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        let err = reporter(&api, &loader)
            .export(CampaignStatus::Sent, "January 1 2017", "January 13 2017", &ws)
            .await
            .unwrap_err();

        assert!(matches!(err, SluiceError::Api(_)));
        assert!(loader.loads().is_empty());
    }

    #[tokio::test]
    async fn test_replace_write_mode() {
        let api = Arc::new(ScriptedApi::new().respond(json!({
            "blasts": [record(9, "Thu, 12 Jan 2017 08:30:00 +0000")]
        })));
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        CampaignReporter::new(
            api.clone(),
            loader.clone(),
            bigquery(),
            7,
            CampaignsWriteMode::Replace,
        )
        .export(CampaignStatus::Sent, "January 1 2017", "January 13 2017", &ws)
        .await
        .unwrap();

        assert_eq!(loader.loads()[0].0.write_mode, WriteMode::Replace);
    }

    #[tokio::test]
    async fn test_empty_report_replace_still_loads() {
        let api = Arc::new(ScriptedApi::new().respond(json!({"blasts": []})));
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        let report = CampaignReporter::new(
            api.clone(),
            loader.clone(),
            bigquery(),
            7,
            CampaignsWriteMode::Replace,
        )
        .export(CampaignStatus::Sent, "January 1 2017", "January 13 2017", &ws)
        .await
        .unwrap();

        assert_eq!(report.records, 0);
        let loads = loader.loads();
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].0.table, "sailthru_blasts.campaigns");
        assert_eq!(loads[0].0.write_mode, WriteMode::Replace);
        assert_eq!(loads[0].1, "");
    }

    #[tokio::test]
    async fn test_window_before_calendar_start_is_rejected() {
        let api = Arc::new(ScriptedApi::new());
        let loader = Arc::new(RecordingLoader::new());
        let ws = Workspace::create().unwrap();

        let err = CampaignReporter::new(
            api.clone(),
            loader.clone(),
            bigquery(),
            u32::MAX,
            CampaignsWriteMode::Append,
        )
        .export(CampaignStatus::Sent, "January 1 2017", "January 13 2017", &ws)
        .await
        .unwrap_err();

        assert!(matches!(err, SluiceError::Validation(_)));
        assert_eq!(api.call_count(), 0);
        assert!(loader.loads().is_empty());
    }

    #[test]
    fn test_select_recent_boundary() {
        let end = NaiveDate::from_ymd_opt(2017, 1, 13).unwrap();
        let cutoff = recent_cutoff(end, 7).unwrap();
        let records: Vec<CampaignRecord> = vec![
            record(10, "Thu, 05 Jan 2017 23:59:59 +0000"),
            record(11, "Fri, 06 Jan 2017 00:00:00 +0000"),
            record(12, "Fri, 06 Jan 2017 00:00:01 -0800"),
        ]
        .into_iter()
        .map(|v| CampaignRecord::from_value(v).unwrap())
        .collect();

        let recent = select_recent(&records, cutoff).unwrap();
        assert_eq!(ids(&recent), vec!["11", "12"]);
    }

    #[test]
    fn test_select_recent_deduplicates() {
        let cutoff = recent_cutoff(NaiveDate::from_ymd_opt(2017, 1, 13).unwrap(), 7).unwrap();
        let records: Vec<CampaignRecord> = vec![
            record(5, "Mon, 09 Jan 2017 09:00:00 +0000"),
            record(5, "Tue, 10 Jan 2017 09:00:00 +0000"),
        ]
        .into_iter()
        .map(|v| CampaignRecord::from_value(v).unwrap())
        .collect();

        assert_eq!(select_recent(&records, cutoff).unwrap().len(), 1);
    }

    #[test]
    fn test_records_from_body_rejects_non_list() {
        let err = records_from_body(json!({"blasts": "nope"})).unwrap_err();
        assert!(matches!(err, SluiceError::InvalidResponse(_)));
    }
}
