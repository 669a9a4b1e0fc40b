use std::sync::{Arc, Mutex};

use chatload_index::TraceStore;
use chatload_providers::{create_adapter, EndpointAdapter, EndpointClient};
use chatload_types::{RunConfig, VisitResponse, Workload};

use crate::error::Result;

/// A configured benchmark run: an endpoint adapter bound to a target server,
/// ready to replay a [`Workload`] against it.
///
/// This is the facade the CLI and embedders build on top of — it hides the
/// provider registry lookup, trace-store wiring, and scheduler invocation
/// behind a single [`Client::run`] call.
pub struct Client {
    http_client: EndpointClient,
    adapter: Arc<dyn EndpointAdapter>,
    config: RunConfig,
    store: Arc<Mutex<TraceStore>>,
}

impl Client {
    /// Looks up `endpoint` in the adapter registry and builds a client
    /// pointed at `base_url` for `model`. Trace events are recorded to an
    /// in-memory store; use [`Client::with_trace_store`] to persist them.
    pub fn connect(endpoint: &str, base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let adapter = create_adapter(endpoint)?;
        let http_client = EndpointClient::builder(base_url, model).build()?;
        let store = TraceStore::open_in_memory()?;
        Ok(Self { http_client, adapter: Arc::from(adapter), config: RunConfig::default(), store: Arc::new(Mutex::new(store)) })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Result<Self> {
        let base_url = self.http_client.base_url().to_string();
        let model = self.http_client.model().to_string();
        self.http_client = EndpointClient::builder(base_url, model).api_key(api_key).build()?;
        Ok(self)
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_trace_store(mut self, store: TraceStore) -> Self {
        self.store = Arc::new(Mutex::new(store));
        self
    }

    /// Replays `workload` in real time and returns every visit's outcome,
    /// in the workload's original order.
    pub async fn run(&self, workload: &Workload) -> Result<Vec<VisitResponse>> {
        let responses = chatload_engine::run_workload(
            workload,
            self.http_client.clone(),
            Arc::clone(&self.adapter),
            Arc::clone(&self.store),
            self.config.clone(),
        )
        .await?;
        Ok(responses)
    }
}
