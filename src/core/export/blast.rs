//! Blast export pipeline
//!
//! Submits a `blast_query` export job, waits for it with bounded backoff,
//! streams the resulting CSV through [`BlastIdPrefixer`] and loads it into
//! `<dataset>.blast_<id>`, replacing the table.

use crate::adapters::bigquery::{LoadRequest, SourceFormat, WarehouseLoader, WriteMode};
use crate::adapters::sailthru::{job_id_from_body, JobStatus, SailthruApi};
use crate::config::{BigQueryConfig, PollConfig};
use crate::core::transform::BlastIdPrefixer;
use crate::core::workspace::Workspace;
use crate::domain::{ApiError, BlastId, JobId, Result, SluiceError};
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of exporting a single blast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastOutcome {
    /// The export was loaded; `rows` excludes the header
    Loaded { rows: usize },
    /// Sailthru did not create an export job
    NoJob,
}

/// Exports one blast's per-recipient data into BigQuery
pub struct BlastExporter {
    api: Arc<dyn SailthruApi>,
    loader: Arc<dyn WarehouseLoader>,
    poll: PollConfig,
    bigquery: BigQueryConfig,
}

impl BlastExporter {
    pub fn new(
        api: Arc<dyn SailthruApi>,
        loader: Arc<dyn WarehouseLoader>,
        poll: PollConfig,
        bigquery: BigQueryConfig,
    ) -> Self {
        Self {
            api,
            loader,
            poll,
            bigquery,
        }
    }

    /// Runs the whole pipeline for `blast_id`
    pub async fn export(&self, blast_id: &BlastId, workspace: &Workspace) -> Result<BlastOutcome> {
        tracing::info!(blast_id = %blast_id, "Submitting blast export job");

        let body = self
            .api
            .post(
                "job",
                &json!({ "job": "blast_query", "blast_id": blast_id.as_str() }),
            )
            .await?;

        let Some(job_id) = job_id_from_body(&body) else {
            tracing::warn!(
                blast_id = %blast_id,
                response = %body,
                "Sailthru did not return a job_id, skipping blast"
            );
            return Ok(BlastOutcome::NoJob);
        };

        tracing::info!(blast_id = %blast_id, job_id = %job_id, "Export job created");

        let export_url = self.wait_for_export(blast_id, &job_id).await?;
        let path = workspace.blast_export_path();
        let rows = self.download_prefixed(blast_id, &export_url, &path).await?;

        let request = self.load_request(blast_id, path);
        self.loader.load(&request).await?;

        tracing::info!(
            blast_id = %blast_id,
            table = %request.table,
            rows,
            "Blast export loaded"
        );
        Ok(BlastOutcome::Loaded { rows })
    }

    /// Polls `GET job` until the job completes, returning its export URL
    async fn wait_for_export(&self, blast_id: &BlastId, job_id: &JobId) -> Result<String> {
        let max_attempts = self.poll.max_attempts;

        for attempt in 1..=max_attempts {
            let body = self
                .api
                .get("job", &json!({ "job_id": job_id.as_str() }))
                .await?;
            let status = JobStatus::from_body(&body);
            crate::log_job_poll!(job_id, attempt, max_attempts, status.label());

            match status {
                JobStatus::Completed { export_url } => {
                    return export_url.ok_or_else(|| {
                        SluiceError::InvalidResponse(format!(
                            "export job {job_id} completed without an export_url"
                        ))
                    });
                }
                JobStatus::Expired => {
                    return Err(ApiError::new(
                        200,
                        None,
                        format!("export job {job_id} for blast {blast_id} expired"),
                    )
                    .into());
                }
                JobStatus::Pending(_) if attempt < max_attempts => {
                    tokio::time::sleep(self.poll.delay_after(attempt)).await;
                }
                JobStatus::Pending(_) => {}
            }
        }

        Err(SluiceError::JobTimedOut {
            job_id: job_id.to_string(),
            attempts: max_attempts,
        })
    }

    /// Streams the export into `path`, returning the number of data rows
    async fn download_prefixed(&self, blast_id: &BlastId, url: &str, path: &Path) -> Result<usize> {
        tracing::debug!(blast_id = %blast_id, url, path = %path.display(), "Downloading export");

        let file = File::create(path)?;
        let mut prefixer = BlastIdPrefixer::new(BufWriter::new(file), blast_id);
        let mut sink = |chunk: &[u8]| -> Result<()> { Ok(prefixer.write_chunk(chunk)?) };
        let bytes = self.api.download(url, &mut sink).await?;

        if prefixer.lines() == 0 {
            return Err(SluiceError::Export(format!(
                "export for blast {blast_id} is empty"
            )));
        }

        let rows = prefixer.data_rows();
        prefixer.finish()?;
        tracing::debug!(blast_id = %blast_id, bytes, rows, "Export downloaded");
        Ok(rows)
    }

    fn load_request(&self, blast_id: &BlastId, source: PathBuf) -> LoadRequest {
        LoadRequest {
            table: self.bigquery.qualified_table(&blast_id.table_name()),
            source,
            schema: PathBuf::from(&self.bigquery.blast_schema),
            format: SourceFormat::Csv,
            skip_leading_rows: 1,
            write_mode: WriteMode::Replace,
        }
    }
}
