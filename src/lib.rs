// Sluice - Sailthru to BigQuery ETL Tool
// Copyright (c) 2025 Sluice Contributors
// Licensed under the MIT License

//! # Sluice - Sailthru to BigQuery ETL
//!
//! Sluice moves email campaign analytics out of Sailthru and into Google
//! BigQuery, where they can be queried alongside the rest of the warehouse.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reporting** campaign metadata for a status and date range
//! - **Exporting** per-recipient blast data through Sailthru's asynchronous
//!   `blast_query` jobs
//! - **Transforming** export CSVs by prepending a `blast_id` column
//! - **Loading** both into BigQuery with the `bq` command-line tool
//!
//! ## Architecture
//!
//! Sluice follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (pipelines, transforms, workspace)
//! - [`adapters`] - External integrations (Sailthru, BigQuery)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sluice::config::load_config;
//! use sluice::core::export::ExportCoordinator;
//! use sluice::core::workspace::Workspace;
//! use sluice::domain::BlastId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("sluice.toml")?;
//!     let coordinator = ExportCoordinator::from_config(&config, false)?;
//!     let workspace = Workspace::create()?;
//!
//!     let blast_id = BlastId::new("8260012")?;
//!     let outcome = coordinator.export_blast(&blast_id, &workspace).await?;
//!
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Sluice uses the [`domain::SluiceError`] type for all errors:
//!
//! ```rust,no_run
//! use sluice::domain::SluiceError;
//!
//! fn example() -> Result<(), SluiceError> {
//!     let config = sluice::config::load_config("sluice.toml")?;
//!     println!("dataset: {}", config.bigquery.dataset);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
