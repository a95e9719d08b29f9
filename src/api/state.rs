//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::datasets::DatasetCatalog;
use crate::events::NoticeHub;
use crate::inference::InferenceClient;
use crate::store::PredictionHistory;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Prediction history and activity log
    pub history: Arc<PredictionHistory>,
    /// Read-only dataset artifacts
    pub datasets: DatasetCatalog,
    /// Remote inference client
    pub inference: Arc<InferenceClient>,
    /// Notice hub for the WebSocket stream
    pub hub: Arc<NoticeHub>,
    /// Service configuration
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        history: Arc<PredictionHistory>,
        datasets: DatasetCatalog,
        inference: Arc<InferenceClient>,
        config: Config,
    ) -> Self {
        Self {
            history,
            datasets,
            inference,
            hub: Arc::new(NoticeHub::default()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
