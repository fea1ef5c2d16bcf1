//! Scripted stand-ins for the adapters, shared by the pipeline tests

use crate::adapters::bigquery::{LoadRequest, WarehouseLoader};
use crate::adapters::sailthru::{ChunkSink, SailthruApi};
use crate::domain::{Result, SluiceError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One recorded API call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub action: String,
    pub params: Value,
}

/// `SailthruApi` answering from a queue of canned responses
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value>>>,
    downloads: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the body returned by the next `get`/`post`
    pub fn respond(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    /// Queues an error for the next `get`/`post`
    pub fn fail(self, error: SluiceError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Serves `chunks` for downloads of `url`
    pub fn serve(self, url: &str, chunks: &[&str]) -> Self {
        self.downloads.lock().unwrap().insert(
            url.to_string(),
            chunks.iter().map(|c| c.as_bytes().to_vec()).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next(&self, method: &'static str, action: &str, params: &Value) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            method,
            action: action.to_string(),
            params: params.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {method} {action}"))
    }
}

#[async_trait]
impl SailthruApi for ScriptedApi {
    async fn get(&self, action: &str, params: &Value) -> Result<Value> {
        self.next("GET", action, params)
    }

    async fn post(&self, action: &str, params: &Value) -> Result<Value> {
        self.next("POST", action, params)
    }

    async fn download(&self, url: &str, sink: &mut ChunkSink<'_>) -> Result<u64> {
        let chunks = self
            .downloads
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| SluiceError::Connection(format!("nothing served at {url}")))?;
        let mut total = 0u64;
        for chunk in chunks {
            total += chunk.len() as u64;
            sink(chunk.as_slice())?;
        }
        Ok(total)
    }
}

/// `WarehouseLoader` that records requests and the loaded file contents
#[derive(Default)]
pub struct RecordingLoader {
    loads: Mutex<Vec<(LoadRequest, String)>>,
    failing_tables: Vec<String>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads into `table` fail with a warehouse error
    pub fn failing_on(mut self, table: &str) -> Self {
        self.failing_tables.push(table.to_string());
        self
    }

    pub fn loads(&self) -> Vec<(LoadRequest, String)> {
        self.loads.lock().unwrap().clone()
    }

    pub fn tables(&self) -> Vec<String> {
        self.loads()
            .into_iter()
            .map(|(request, _)| request.table)
            .collect()
    }
}

#[async_trait]
impl WarehouseLoader for RecordingLoader {
    async fn load(&self, request: &LoadRequest) -> Result<()> {
        if self.failing_tables.contains(&request.table) {
            return Err(SluiceError::Warehouse(format!(
                "bq load into {} exited with status 1",
                request.table
            )));
        }
        let contents = std::fs::read_to_string(&request.source)?;
        self.loads
            .lock()
            .unwrap()
            .push((request.clone(), contents));
        Ok(())
    }
}
