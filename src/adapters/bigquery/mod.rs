//! BigQuery integration
//!
//! - [`WarehouseLoader`] - bulk-load abstraction used by the pipelines
//! - [`BqCliLoader`] - implementation that shells out to `bq load`

pub mod cli;
pub mod traits;

pub use cli::BqCliLoader;
pub use traits::{LoadRequest, SourceFormat, WarehouseLoader, WriteMode};
