//! External system integrations for Sluice.
//!
//! - [`sailthru`] - Sailthru REST API client (source)
//! - [`bigquery`] - BigQuery bulk loader (destination)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits
//! ([`sailthru::SailthruApi`], [`bigquery::WarehouseLoader`]) so the export
//! pipelines can be exercised with scripted implementations.

pub mod bigquery;
pub mod sailthru;
