//! Persistence layer.
//!
//! A small string key-value abstraction with in-memory and file-backed
//! implementations, and the prediction history that lives on top of it.
//! The history is single-writer by construction; whole lists are
//! rewritten after every mutation.

mod history;
mod kv;

pub use history::{ActivityEntry, ActivityKind, PredictionHistory};
pub use kv::{FileStore, MemoryStore};

use async_trait::async_trait;
use thiserror::Error;

/// String key-value store used for durable state.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Errors from the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt state: {0}")]
    Corrupt(#[from] serde_json::Error),
}
