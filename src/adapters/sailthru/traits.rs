//! Sailthru API abstraction
//!
//! The export pipelines talk to Sailthru only through [`SailthruApi`], which
//! keeps them testable against scripted responses.

use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Receives an export file chunk by chunk
pub type ChunkSink<'a> = dyn FnMut(&[u8]) -> Result<()> + Send + 'a;

/// Operations the export pipelines need from Sailthru
#[async_trait]
pub trait SailthruApi: Send + Sync {
    /// Perform one authenticated GET of `action` and return the JSON body
    ///
    /// # Errors
    ///
    /// Returns `SluiceError::Api` when the response is not a success.
    async fn get(&self, action: &str, params: &Value) -> Result<Value>;

    /// Perform one authenticated POST of `action` and return the JSON body
    ///
    /// # Errors
    ///
    /// Returns `SluiceError::Api` when the response is not a success.
    async fn post(&self, action: &str, params: &Value) -> Result<Value>;

    /// Stream the file at `url` into `sink`, returning the number of bytes read
    async fn download(&self, url: &str, sink: &mut ChunkSink<'_>) -> Result<u64>;
}
