//! Per-run temporary workspace
//!
//! Holds the intermediate files handed to the loader. The directory is
//! removed when the [`Workspace`] is dropped, on success and error paths
//! alike; a killed process may leave it behind.

use crate::domain::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BLAST_EXPORT_FILE: &str = "blast_export.csv";
const CAMPAIGNS_EXPORT_FILE: &str = "campaigns_export.json";

/// Temporary directory for one run
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a fresh directory under the system temp dir
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("sluice-")
            .suffix("temp_data_dir")
            .tempdir()?;
        tracing::info!(temp_dir = %dir.path().display(), "Created temp workspace");
        Ok(Self { dir })
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Rewritten blast export (overwritten for every blast)
    pub fn blast_export_path(&self) -> PathBuf {
        self.dir.path().join(BLAST_EXPORT_FILE)
    }

    /// Campaign report NDJSON
    pub fn campaigns_export_path(&self) -> PathBuf {
        self.dir.path().join(CAMPAIGNS_EXPORT_FILE)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        tracing::debug!(temp_dir = %self.dir.path().display(), "Removing temp workspace");
    }
}
