//! Sailthru API integration
//!
//! - [`SailthruClient`] - signed HTTP client for the Sailthru REST API
//! - [`SailthruApi`] - the operations the export pipelines depend on
//! - [`JobStatus`] - export job state parsing

pub mod client;
pub mod models;
pub mod signature;
pub mod traits;

pub use client::SailthruClient;
pub use models::{job_id_from_body, JobStatus};
pub use traits::{ChunkSink, SailthruApi};
