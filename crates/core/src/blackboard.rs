//! The blackboard: an append-only, typed message log shared by agents.
//!
//! An orchestrator creates one [`Blackboard`] per session, sets the task,
//! and hands the same board to each agent in turn. Agents read only the
//! messages they need (usually the latest of one kind) and post their own
//! output back. There is no other channel between agents.
//!
//! # Concurrency
//!
//! The board is `Send + Sync` and meant to be shared as `Arc<Blackboard>`.
//! A single `RwLock` guards both the task and the log:
//!
//! - `post` assigns the sequence number and pushes inside one write
//!   section, so concurrent posters never share a number
//! - readers take the read lock and always see whole messages
//! - events are sent inside the same write section, so subscribers see
//!   them in sequence order
//! - no critical section performs I/O or awaits, so nothing blocks for long
//!
//! # Lookup cost
//!
//! `get_latest_by_type` is a backward linear scan. A session holds one
//! message per agent turn, so the log stays small and no per-kind index is
//! kept.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::event::{DomainEvent, EventBus};
use crate::message::{Message, MessageKind};

/// Unique identifier for a blackboard session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub String);

impl BoardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
struct BoardState {
    task: String,
    log: Vec<Message>,
}

/// Shared coordination log for one multi-agent session.
#[derive(Debug)]
pub struct Blackboard {
    id: BoardId,
    state: RwLock<BoardState>,
    events: Option<Arc<EventBus>>,
}

/// A point-in-time export of a blackboard (task plus full log).
///
/// Used for transcripts and debugging output; a board is never rebuilt
/// from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub id: BoardId,
    pub task: String,
    pub messages: Vec<Message>,
}

impl Blackboard {
    /// Create an empty board with a fresh session id and no task.
    pub fn new() -> Self {
        Self::with_id(BoardId::new())
    }

    /// Create an empty board with a caller-chosen session id.
    pub fn with_id(id: BoardId) -> Self {
        Self {
            id,
            state: RwLock::new(BoardState::default()),
            events: None,
        }
    }

    /// Publish a [`DomainEvent`] on `bus` after every write.
    ///
    /// Events are sent while the write lock is held, so every subscriber
    /// receives `MessagePosted` events in sequence order. Sending never
    /// blocks; a lagging subscriber drops its oldest events instead.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn id(&self) -> &BoardId {
        &self.id
    }

    // An append is a single push, so a panic elsewhere while holding the
    // lock can never leave a half-written message behind.
    fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: impl FnOnce() -> DomainEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event());
        }
    }

    // --- Task ---

    /// Replace the current task. Any text is accepted, including empty.
    pub fn set_task(&self, text: impl Into<String>) {
        let text = text.into();
        let chars = text.len();
        {
            let mut state = self.write();
            state.task.clone_from(&text);
            self.publish(|| DomainEvent::TaskSet {
                board_id: self.id.to_string(),
                task: text,
                timestamp: Utc::now(),
            });
        }

        debug!(board = %self.id, chars, "Task set");
    }

    /// The current task, or an empty string if none was ever set.
    pub fn current_task(&self) -> String {
        self.read().task.clone()
    }

    // --- Write path ---

    /// Append a message and return it.
    ///
    /// The message is stamped with the next sequence number and is visible
    /// to every reader as soon as this returns.
    pub fn post(
        &self,
        sender: impl Into<String>,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> Message {
        let message = {
            let mut state = self.write();
            let sequence = state.log.len() as u64;
            debug_assert!(
                state.log.last().is_none_or(|last| last.sequence() < sequence),
                "sequence numbers must strictly increase"
            );
            let message = Message::new(sequence, sender, content, kind);
            state.log.push(message.clone());

            // Sent under the lock so subscribers see events in sequence order.
            self.publish(|| DomainEvent::MessagePosted {
                board_id: self.id.to_string(),
                sequence: message.sequence(),
                sender: message.sender().to_string(),
                kind,
                timestamp: message.timestamp(),
            });
            message
        };

        debug!(
            board = %self.id,
            sequence = message.sequence(),
            sender = message.sender(),
            kind = %kind,
            "Message posted"
        );

        message
    }

    // --- Read path ---

    /// The most recently posted message of `kind`, if any.
    pub fn get_latest_by_type(&self, kind: MessageKind) -> Option<Message> {
        self.read()
            .log
            .iter()
            .rev()
            .find(|m| m.kind() == kind)
            .cloned()
    }

    /// Every message of `kind`, oldest first.
    pub fn get_all_by_type(&self, kind: MessageKind) -> Vec<Message> {
        self.read()
            .log
            .iter()
            .filter(|m| m.kind() == kind)
            .cloned()
            .collect()
    }

    /// The whole log, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.read().log.clone()
    }

    pub fn len(&self) -> usize {
        self.read().log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().log.is_empty()
    }

    /// Task and log captured under a single lock.
    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.read();
        BoardSnapshot {
            id: self.id.clone(),
            task: state.task.clone(),
            messages: state.log.clone(),
        }
    }
}

impl BoardSnapshot {
    /// Pretty-printed JSON transcript.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Blackboard {
    fn default() -> Self {
        Self::new()
    }
}
