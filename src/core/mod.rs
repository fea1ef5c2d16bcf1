//! Core business logic for Sluice.
//!
//! # Modules
//!
//! - [`export`] - Blast and campaign pipelines and their coordination
//! - [`transform`] - CSV prefixing and NDJSON output
//! - [`workspace`] - Per-run temporary directory
//!
//! # Daily Workflow
//!
//! 1. **Campaigns**: Fetch sent campaigns up to today and load them
//! 2. **Select**: Collect blasts that started within the recent window
//! 3. **Export**: For each recent blast, run an export job and wait for it
//! 4. **Rewrite**: Prefix every CSV line with the blast id
//! 5. **Load**: Replace `blast_<id>` in BigQuery
//! 6. **Report**: Log the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use sluice::config::load_config;
//! use sluice::core::export::ExportCoordinator;
//! use sluice::core::workspace::Workspace;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sluice.toml")?;
//! let coordinator = ExportCoordinator::from_config(&config, false)?;
//! let workspace = Workspace::create()?;
//!
//! let summary = coordinator
//!     .run_daily(chrono::Local::now().date_naive(), &workspace)
//!     .await?;
//!
//! println!("Loaded: {}", summary.blasts_loaded);
//! println!("Failed: {}", summary.failures.len());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod transform;
pub mod workspace;
