//! Event Hub
//!
//! In-process pub/sub for UI-facing notices, built on a tokio broadcast
//! channel. Delivery is at-least-once within a session with no ordering
//! guarantee; a receiver that falls behind drops the oldest events and
//! keeps going.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::model::RiskCategory;

/// A notice pushed to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// The remote model is waking up; clients show a waiting overlay.
    PredictionWait { url: String },
    /// A prediction record was created and stored.
    PredictionCreated {
        id: String,
        region: String,
        category: RiskCategory,
    },
    /// An export download finished.
    ExportCompleted { format: String, count: usize },
}

/// Broadcast hub for [`Notice`] events.
pub struct NoticeHub {
    tx: broadcast::Sender<Notice>,
}

impl NoticeHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a notice to all current subscribers. Fire-and-forget: a
    /// hub with no subscribers swallows the event.
    pub fn publish(&self, notice: Notice) {
        let receivers = self.tx.receiver_count();
        if self.tx.send(notice.clone()).is_ok() {
            tracing::trace!(?notice, receivers, "notice published");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NoticeHub {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let hub = NoticeHub::default();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish(Notice::ExportCompleted {
            format: "csv".to_string(),
            count: 3,
        });

        let n1 = rx1.recv().await.unwrap();
        let n2 = rx2.recv().await.unwrap();
        assert_eq!(n1, n2);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let hub = NoticeHub::default();
        // no receiver; must not panic or error
        hub.publish(Notice::PredictionWait {
            url: "https://example.org".to_string(),
        });
        assert_eq!(hub.receiver_count(), 0);
    }

    #[test]
    fn test_notice_wire_format() {
        let notice = Notice::PredictionCreated {
            id: "abc".to_string(),
            region: "Western".to_string(),
            category: RiskCategory::High,
        };

        let json = serde_json::to_string(&notice).unwrap();
        assert!(json.contains(r#""type":"prediction_created""#));
        assert!(json.contains(r#""category":"High""#));
    }

    #[tokio::test]
    async fn test_lagged_receiver_recovers() {
        let hub = NoticeHub::new(2);
        let mut rx = hub.subscribe();

        for i in 0..5 {
            hub.publish(Notice::ExportCompleted {
                format: "json".to_string(),
                count: i,
            });
        }

        // the first recv reports the lag, subsequent ones deliver
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(_))
        ));
        assert!(rx.recv().await.is_ok());
    }
}
