//! Domain event system — lets observers follow a blackboard session.
//!
//! The blackboard publishes an event after every write. Observers (a CLI
//! progress printer, a test) subscribe instead of polling the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::message::MessageKind;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// The current task of a blackboard was replaced
    TaskSet {
        board_id: String,
        task: String,
        timestamp: DateTime<Utc>,
    },

    /// A message was appended to a blackboard log
    MessagePosted {
        board_id: String,
        sequence: u64,
        sender: String,
        kind: MessageKind,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Publishing is
/// synchronous and never waits on slow subscribers; lagging receivers lose
/// the oldest events.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::MessagePosted {
            board_id: "b1".into(),
            sequence: 0,
            sender: "planner".into(),
            kind: MessageKind::Plan,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            DomainEvent::MessagePosted { sender, kind, .. } => {
                assert_eq!(sender, "planner");
                assert_eq!(*kind, MessageKind::Plan);
            }
            _ => panic!("Expected MessagePosted event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(0);
        bus.publish(DomainEvent::TaskSet {
            board_id: "b1".into(),
            task: "nobody listens".into(),
            timestamp: Utc::now(),
        });
    }
}
