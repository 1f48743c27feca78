//! # Agentboard Core
//!
//! The shared coordination structure for multi-agent runs: an append-only,
//! typed message log (the blackboard) plus the domain types every other
//! crate builds on.
//!
//! ## Design Philosophy
//!
//! Agents never call each other. They read what they need from a
//! [`Blackboard`] and post their own output back to it. Everything that
//! talks to the outside world (LLM providers, prompt building, code
//! extraction) lives in other crates and depends inward on this one:
//! - The blackboard is passed explicitly to each agent, never global
//! - Text generation is abstracted behind the [`Provider`] trait
//! - Observers subscribe to [`EventBus`] instead of polling the log

pub mod error;
pub mod message;
pub mod blackboard;
pub mod provider;
pub mod event;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, Error, ProviderError, Result};
pub use message::{Message, MessageKind, ParseKindError};
pub use blackboard::{Blackboard, BoardId, BoardSnapshot};
pub use provider::{ChatMessage, Provider, ProviderRequest, ProviderResponse, Role, Usage};
pub use event::{DomainEvent, EventBus};
