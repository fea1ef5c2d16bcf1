//! Sailthru REST API client
//!
//! Thin authenticated request layer. Each call is signed (see
//! [`super::signature`]), performs exactly one HTTP request and turns every
//! non-success response into an [`ApiError`]. Retries are left to callers.

use super::signature;
use super::traits::{ChunkSink, SailthruApi};
use crate::config::{SailthruConfig, SecretString};
use crate::domain::{ApiError, Result, SluiceError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Sailthru API client
///
/// # Example
///
/// ```no_run
/// use sluice::adapters::sailthru::{SailthruApi, SailthruClient};
/// use sluice::config::load_config;
/// use serde_json::json;
///
/// # async fn example() -> sluice::domain::Result<()> {
/// let config = load_config("sluice.toml")?;
/// let client = SailthruClient::new(&config.sailthru)?;
///
/// let body = client.get("blast", &json!({"status": "sent"})).await?;
/// println!("{}", body["blasts"]);
/// # Ok(())
/// # }
/// ```
pub struct SailthruClient {
    /// Base URL without trailing slash
    base_url: String,

    api_key: String,

    api_secret: SecretString,

    http: Client,

    /// Client for export downloads, bounded per chunk instead of per request
    download_http: Client,

    /// Longest wait for the next download chunk
    idle_timeout: Duration,
}

impl SailthruClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &SailthruConfig) -> Result<Self> {
        let idle_timeout = Duration::from_secs(config.timeout_seconds);

        let http = ClientBuilder::new()
            .timeout(idle_timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SluiceError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        // Large exports stream for longer than any single API call, so only
        // the gap between chunks is bounded here.
        let download_http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SluiceError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            http,
            download_http,
            idle_timeout,
        })
    }

    /// Get the base URL of the Sailthru API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}", self.base_url, action.trim_start_matches('/'))
    }

    /// Request parameters including `api_key`, `format` and `sig`
    fn signed_params(&self, params: &Value) -> Result<Vec<(&'static str, String)>> {
        let json = serde_json::to_string(params)?;
        let sig = signature::sign(
            self.api_secret.expose_secret().as_ref(),
            &[self.api_key.as_str(), "json", json.as_str()],
        );

        Ok(vec![
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("json", json),
            ("sig", sig),
        ])
    }

    async fn decode_response(action: &str, response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            SluiceError::Connection(format!("Failed to read Sailthru response for {action}: {e}"))
        })?;

        let body: Option<Value> = serde_json::from_str(&text).ok();

        if let Some(code) = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .filter(|c| !c.is_null())
        {
            let message = body
                .as_ref()
                .and_then(|b| b.get("errormsg"))
                .and_then(Value::as_str)
                .unwrap_or(&text);
            return Err(ApiError::new(status.as_u16(), code.as_i64(), message).into());
        }

        if !status.is_success() {
            return Err(ApiError::new(status.as_u16(), None, text).into());
        }

        body.ok_or_else(|| {
            SluiceError::Serialization(format!("Sailthru response for {action} is not JSON: {text}"))
        })
    }

    fn download_stalled(&self) -> SluiceError {
        SluiceError::Connection(format!(
            "Sailthru request export download timed out: no data for {}s",
            self.idle_timeout.as_secs()
        ))
    }
}

fn connection_error(action: &str, err: reqwest::Error) -> SluiceError {
    if err.is_timeout() {
        SluiceError::Connection(format!("Sailthru request {action} timed out: {err}"))
    } else {
        SluiceError::Connection(format!("Sailthru request {action} failed: {err}"))
    }
}

#[async_trait]
impl SailthruApi for SailthruClient {
    async fn get(&self, action: &str, params: &Value) -> Result<Value> {
        tracing::debug!(action = %action, "Sailthru GET");

        let response = self
            .http
            .get(self.endpoint(action))
            .query(&self.signed_params(params)?)
            .send()
            .await
            .map_err(|e| connection_error(action, e))?;

        Self::decode_response(action, response).await
    }

    async fn post(&self, action: &str, params: &Value) -> Result<Value> {
        tracing::debug!(action = %action, "Sailthru POST");

        let response = self
            .http
            .post(self.endpoint(action))
            .form(&self.signed_params(params)?)
            .send()
            .await
            .map_err(|e| connection_error(action, e))?;

        Self::decode_response(action, response).await
    }

    async fn download(&self, url: &str, sink: &mut ChunkSink<'_>) -> Result<u64> {
        tracing::debug!(url = %url, "Downloading Sailthru export");

        let mut response = tokio::time::timeout(self.idle_timeout, self.download_http.get(url).send())
            .await
            .map_err(|_| self.download_stalled())?
            .map_err(|e| connection_error("export download", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::new(
                status.as_u16(),
                None,
                format!("export download failed: {body}"),
            )
            .into());
        }

        let mut total = 0u64;
        while let Some(chunk) = tokio::time::timeout(self.idle_timeout, response.chunk())
            .await
            .map_err(|_| self.download_stalled())?
            .map_err(|e| connection_error("export download", e))?
        {
            total += chunk.len() as u64;
            sink(&chunk[..])?;
        }

        Ok(total)
    }
}
