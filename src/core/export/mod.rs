//! Export pipelines and orchestration
//!
//! This module provides the core export logic for Sluice, including:
//! - The blast export pipeline (job, poll, download, load)
//! - The campaign report pipeline
//! - Coordination of the single-blast, campaign and daily modes
//! - Summary and reporting

pub mod blast;
pub mod campaigns;
pub mod coordinator;
pub mod summary;

#[cfg(test)]
pub(crate) mod fakes;

pub use blast::{BlastExporter, BlastOutcome};
pub use campaigns::{select_recent, CampaignReport, CampaignReporter};
pub use coordinator::ExportCoordinator;
pub use summary::{BlastFailure, ExportSummary};
