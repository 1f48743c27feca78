//! Message domain types.
//!
//! A [`Message`] is one immutable, sequenced record on the blackboard.
//! Agents tag what they post with a [`MessageKind`] so that others can
//! pick out only what they care about (the latest plan, all code, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The category a message belongs to.
///
/// Used purely as a filter key, never as a payload schema. New kinds are
/// only ever added, so stored messages keep their meaning across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum MessageKind {
    /// The problem statement handed to the agents
    Task,
    /// A step-by-step plan for solving the task
    Plan,
    /// Generated source code
    Code,
    /// Feedback on generated code
    Review,
}

impl MessageKind {
    /// Every kind known to this version, in declaration order.
    pub const ALL: [MessageKind; 4] = [
        MessageKind::Task,
        MessageKind::Plan,
        MessageKind::Code,
        MessageKind::Review,
    ];

    /// The lowercase tag used in logs and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Task => "task",
            MessageKind::Plan => "plan",
            MessageKind::Code => "code",
            MessageKind::Review => "review",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`MessageKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown message kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for MessageKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// A single posted communication.
///
/// Messages are only created by [`Blackboard::post`](crate::Blackboard::post),
/// which assigns the sequence number. Fields are read through accessors so a
/// handle returned from the blackboard can never alter the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Position in the log; "latest" means highest sequence
    sequence: u64,

    /// Which agent produced this message
    sender: String,

    /// Category used for filtering
    kind: MessageKind,

    /// The text payload, stored exactly as posted
    content: String,

    /// Wall-clock time of insertion (informational; ordering uses `sequence`)
    timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(
        sequence: u64,
        sender: impl Into<String>,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self {
            sequence,
            sender: sender.into(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Consume the message and keep only its payload.
    pub fn into_content(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("PLAN".parse::<MessageKind>(), Ok(MessageKind::Plan));
        assert_eq!(" code ".parse::<MessageKind>(), Ok(MessageKind::Code));
        assert_eq!("Review".parse::<MessageKind>(), Ok(MessageKind::Review));
        assert!("diagram".parse::<MessageKind>().is_err());
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&MessageKind::Task).unwrap();
        assert_eq!(json, "\"task\"");
        let kind: MessageKind = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(kind, MessageKind::Review);
    }

    #[test]
    fn display_matches_tag() {
        for kind in MessageKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn message_keeps_content_verbatim() {
        let msg = Message::new(3, "coder", "  def f(): pass\n", MessageKind::Code);
        assert_eq!(msg.sequence(), 3);
        assert_eq!(msg.sender(), "coder");
        assert_eq!(msg.kind(), MessageKind::Code);
        assert_eq!(msg.content(), "  def f(): pass\n");
        assert_eq!(msg.into_content(), "  def f(): pass\n");
    }
}
