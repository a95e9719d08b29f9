//! # NutriWatch
//!
//! Child Malnutrition Monitoring - a full-stack Rust service that scores
//! malnutrition risk for individual children and serves chart-ready
//! aggregates over precomputed district analytics.
//!
//! ## Features
//!
//! - **Risk scoring**: Deterministic heuristic assessment with a remote
//!   ML model in front and graceful fallback when it is unreachable
//! - **Aggregation pipeline**: Pure reductions over prediction history
//!   and district analytics, tolerant of duck-typed source data
//! - **Durable history**: Append-only prediction log over a pluggable
//!   key-value store
//! - **Real-time**: WebSocket notice stream for connected dashboards
//!
//! ## Modules
//!
//! - [`scoring`]: Heuristic risk score, confidence, recommendations
//! - [`inference`]: Remote model client and fallback resolution
//! - [`analytics`]: Aggregation pipeline
//! - [`datasets`]: Read-only JSON artifacts
//! - [`store`]: History persistence
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nutriwatch::api::{serve, AppState};
//! use nutriwatch::config::Config;
//! use nutriwatch::datasets::DatasetCatalog;
//! use nutriwatch::inference::{InferenceClient, InferenceConfig};
//! use nutriwatch::store::{FileStore, PredictionHistory};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!
//!     let store = Arc::new(FileStore::new(&config.store.state_dir));
//!     let history = Arc::new(PredictionHistory::load(store).await?);
//!     let datasets = DatasetCatalog::new(&config.datasets.data_dir);
//!     let inference = Arc::new(InferenceClient::new(InferenceConfig::default())?);
//!
//!     let api = config.api.clone();
//!     let state = AppState::new(history, datasets, inference, config);
//!     serve(state, &api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod datasets;
pub mod events;
pub mod export;
pub mod inference;
pub mod model;
pub mod scoring;
pub mod store;

// Re-export top-level types for convenience
pub use model::{
    ChildSurveyRow, DistrictAnalytics, EducationLevel, InputEcho, PolicyBrief, PredictionInput,
    PredictionRecord, ProvinceSummary, RiskCategory, Settlement,
};

pub use scoring::{confidence_estimate, recommendations, risk_score, round1};

pub use inference::{
    resolve_prediction, InferenceClient, InferenceConfig, InferenceError, RemotePrediction,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use datasets::{policy_brief_view, DatasetCatalog};

pub use events::{Notice, NoticeHub};

pub use store::{
    ActivityEntry, ActivityKind, FileStore, KvStore, MemoryStore, PredictionHistory, StoreError,
};

pub use config::{Config, ConfigError, LoggingConfig};
