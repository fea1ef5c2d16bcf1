//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting daily export results.

use crate::core::export::blast::BlastOutcome;
use crate::domain::BlastId;
use std::time::Duration;

/// A blast whose export failed during a daily run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlastFailure {
    /// Blast that failed
    pub blast_id: BlastId,

    /// Error message
    pub message: String,
}

impl BlastFailure {
    /// Create a new BlastFailure
    pub fn new(blast_id: BlastId, message: impl Into<String>) -> Self {
        Self {
            blast_id,
            message: message.into(),
        }
    }
}

/// Summary of a daily export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of campaign records exported
    pub campaigns_exported: usize,

    /// Number of blasts in the recent set
    pub recent_blasts: usize,

    /// Number of blasts loaded into BigQuery
    pub blasts_loaded: usize,

    /// Number of blasts skipped because no export job was created
    pub blasts_skipped: usize,

    /// Data rows loaded across all blasts
    pub rows_loaded: usize,

    /// Blasts that failed
    pub failures: Vec<BlastFailure>,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            campaigns_exported: 0,
            recent_blasts: 0,
            blasts_loaded: 0,
            blasts_skipped: 0,
            rows_loaded: 0,
            failures: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count the outcome of one blast export
    pub fn record_outcome(&mut self, outcome: &BlastOutcome) {
        match outcome {
            BlastOutcome::Loaded { rows } => {
                self.blasts_loaded += 1;
                self.rows_loaded += rows;
            }
            BlastOutcome::NoJob => self.blasts_skipped += 1,
        }
    }

    /// Add a failure
    pub fn add_failure(&mut self, failure: BlastFailure) {
        self.failures.push(failure);
    }

    /// Check if every blast either loaded or was skipped
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            campaigns_exported = self.campaigns_exported,
            recent_blasts = self.recent_blasts,
            blasts_loaded = self.blasts_loaded,
            blasts_skipped = self.blasts_skipped,
            rows_loaded = self.rows_loaded,
            failed = self.failures.len(),
            duration_secs = self.duration.as_secs(),
            "Daily export completed"
        );

        if !self.failures.is_empty() {
            tracing::warn!(
                failure_count = self.failures.len(),
                "Daily export completed with failures"
            );
            for failure in &self.failures {
                tracing::warn!(
                    blast_id = %failure.blast_id,
                    message = %failure.message,
                    "Blast export failed"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}
