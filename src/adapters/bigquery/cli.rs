//! BigQuery loader backed by the external `bq` binary

use super::traits::{LoadRequest, WarehouseLoader, WriteMode};
use crate::config::BigQueryConfig;
use crate::domain::{Result, SluiceError};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;

/// Runs `bq load` as a child process
///
/// # Examples
///
/// ```no_run
/// use sluice::adapters::bigquery::BqCliLoader;
/// use sluice::config::load_config;
///
/// # fn example() -> sluice::domain::Result<()> {
/// let config = load_config("sluice.toml")?;
/// let loader = BqCliLoader::from_config(&config.bigquery, false)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BqCliLoader {
    binary_path: PathBuf,
    project: String,
    dry_run: bool,
}

impl BqCliLoader {
    /// Create a loader with an explicit binary path
    pub fn new(binary_path: PathBuf, project: impl Into<String>, dry_run: bool) -> Self {
        Self {
            binary_path,
            project: project.into(),
            dry_run,
        }
    }

    /// Create a loader from configuration
    ///
    /// Uses `bigquery.bq_binary` when set, otherwise looks `bq` up on PATH.
    /// In dry-run mode a missing binary is tolerated since it is never run.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `bq` cannot be found.
    pub fn from_config(config: &BigQueryConfig, dry_run: bool) -> Result<Self> {
        let binary_path = match &config.bq_binary {
            Some(path) => PathBuf::from(path),
            None => match which::which("bq") {
                Ok(path) => path,
                Err(_) if dry_run => PathBuf::from("bq"),
                Err(e) => {
                    return Err(SluiceError::Configuration(format!(
                        "bq binary not found on PATH ({e}); set bigquery.bq_binary"
                    )))
                }
            },
        };

        Ok(Self::new(binary_path, config.project.clone(), dry_run))
    }

    /// Path of the `bq` binary in use
    pub fn binary_path(&self) -> &PathBuf {
        &self.binary_path
    }

    /// Arguments passed to `bq` for a load
    pub fn command_args(&self, request: &LoadRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--headless".into(),
            "--quiet".into(),
            format!("--project_id={}", self.project).into(),
            "load".into(),
            format!("--source_format={}", request.format.as_bq_flag()).into(),
        ];

        if request.skip_leading_rows > 0 {
            args.push(format!("--skip_leading_rows={}", request.skip_leading_rows).into());
        }

        if request.write_mode == WriteMode::Replace {
            args.push("--replace".into());
        }

        args.push(request.table.clone().into());
        args.push(request.source.clone().into_os_string());
        args.push(request.schema.clone().into_os_string());
        args
    }
}

#[async_trait]
impl WarehouseLoader for BqCliLoader {
    async fn load(&self, request: &LoadRequest) -> Result<()> {
        let args = self.command_args(request);

        if self.dry_run {
            tracing::info!(
                table = %request.table,
                source = %request.source.display(),
                args = ?args,
                "Dry run: skipping bq load"
            );
            return Ok(());
        }

        tracing::info!(
            table = %request.table,
            source = %request.source.display(),
            "Loading file into BigQuery"
        );

        let output = Command::new(&self.binary_path)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                SluiceError::Warehouse(format!(
                    "Failed to execute {}: {}",
                    self.binary_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(SluiceError::Warehouse(format!(
                "bq load into {} failed ({}): {}",
                request.table,
                output.status,
                if stderr.trim().is_empty() { stdout.trim() } else { stderr.trim() }
            )));
        }

        tracing::debug!(table = %request.table, "bq load finished");
        Ok(())
    }
}
