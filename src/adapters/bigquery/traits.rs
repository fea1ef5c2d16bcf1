//! Warehouse loader abstraction
//!
//! A load takes a local file, a schema file and a destination table. The
//! pipelines only build [`LoadRequest`]s; how the load runs is up to the
//! [`WarehouseLoader`] implementation.

use crate::domain::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Format of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// CSV with a header row
    Csv,
    /// One JSON object per line
    NewlineDelimitedJson,
}

impl SourceFormat {
    /// Value of `bq load --source_format`
    pub fn as_bq_flag(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "CSV",
            SourceFormat::NewlineDelimitedJson => "NEWLINE_DELIMITED_JSON",
        }
    }
}

/// What happens to rows already in the destination table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep existing rows
    Append,
    /// Discard existing rows
    Replace,
}

/// One bulk load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Destination as `dataset.table`
    pub table: String,

    /// File to load
    pub source: PathBuf,

    /// BigQuery JSON schema file
    pub schema: PathBuf,

    pub format: SourceFormat,

    /// Leading rows to skip (CSV header)
    pub skip_leading_rows: u32,

    pub write_mode: WriteMode,
}

/// Bulk loader into the warehouse
#[async_trait]
pub trait WarehouseLoader: Send + Sync {
    /// Run the load to completion
    ///
    /// # Errors
    ///
    /// Returns `SluiceError::Warehouse` if the load fails.
    async fn load(&self, request: &LoadRequest) -> Result<()>;
}
