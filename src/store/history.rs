//! Prediction history and activity log.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{KvStore, StoreError};
use crate::model::PredictionRecord;

const PREDICTIONS_KEY: &str = "predictions";
const ACTIVITY_KEY: &str = "activity";

/// What produced an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    System,
    Prediction,
    Export,
}

/// One line of the activity log, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
}

impl ActivityEntry {
    fn new(action: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.into(),
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// The stored prediction list plus its activity log.
///
/// State is loaded from the store once at construction and held in
/// memory; every mutation rewrites the affected list through the store.
/// There is no conflict detection, the service is the only writer.
pub struct PredictionHistory {
    store: Arc<dyn KvStore>,
    records: RwLock<Vec<PredictionRecord>>,
    activity: RwLock<Vec<ActivityEntry>>,
}

impl PredictionHistory {
    /// Load existing state, seeding an empty activity log with a
    /// "System initialized" entry.
    pub async fn load(store: Arc<dyn KvStore>) -> Result<Self, StoreError> {
        let records: Vec<PredictionRecord> = match store.get(PREDICTIONS_KEY).await? {
            Some(text) => serde_json::from_str(&text)?,
            None => Vec::new(),
        };
        let mut activity: Vec<ActivityEntry> = match store.get(ACTIVITY_KEY).await? {
            Some(text) => serde_json::from_str(&text)?,
            None => Vec::new(),
        };

        let history = Self {
            store,
            records: RwLock::new(records),
            activity: RwLock::new(Vec::new()),
        };

        if activity.is_empty() {
            activity.push(ActivityEntry::new("System initialized", ActivityKind::System));
            history.persist_activity(&activity).await?;
        }
        *history.activity.write().await = activity;

        Ok(history)
    }

    pub async fn records(&self) -> Vec<PredictionRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn activity(&self) -> Vec<ActivityEntry> {
        self.activity.read().await.clone()
    }

    /// Append a record and log the creation.
    pub async fn append(&self, record: PredictionRecord) -> Result<(), StoreError> {
        let action = format!(
            "Prediction created for {} ({} risk)",
            record.region,
            record.risk_category.as_str()
        );

        {
            let mut records = self.records.write().await;
            records.push(record);
            self.persist_records(&records).await?;
        }
        self.log(action, ActivityKind::Prediction).await
    }

    /// Remove a record by id. Returns false when no record matched.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let removed = {
            let mut records = self.records.write().await;
            let before = records.len();
            records.retain(|r| r.id != id);
            if records.len() == before {
                return Ok(false);
            }
            self.persist_records(&records).await?;
            true
        };

        self.log(format!("Prediction {id} deleted"), ActivityKind::Prediction)
            .await?;
        Ok(removed)
    }

    /// Prepend an activity entry and persist the log.
    pub async fn log(
        &self,
        action: impl Into<String>,
        kind: ActivityKind,
    ) -> Result<(), StoreError> {
        let mut activity = self.activity.write().await;
        activity.insert(0, ActivityEntry::new(action, kind));
        self.persist_activity(&activity).await
    }

    async fn persist_records(&self, records: &[PredictionRecord]) -> Result<(), StoreError> {
        let text = serde_json::to_string(records)?;
        self.store.set(PREDICTIONS_KEY, &text).await
    }

    async fn persist_activity(&self, activity: &[ActivityEntry]) -> Result<(), StoreError> {
        let text = serde_json::to_string(activity)?;
        self.store.set(ACTIVITY_KEY, &text).await
    }
}
