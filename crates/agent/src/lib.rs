//! Agents that coordinate through a shared blackboard.
//!
//! Each agent follows the same cycle:
//!
//! 1. **Read** the messages it needs from the [`Blackboard`](agentboard_core::Blackboard)
//!    (the task, the latest plan, the latest code)
//! 2. **Build a prompt** from them
//! 3. **Generate** text through its LLM provider
//! 4. **Post** the result back as a typed message
//!
//! The [`Orchestrator`] sets the task and invokes planner, coder and
//! reviewer in order. No agent holds a reference to another.

pub mod base;
pub mod coder;
pub mod extract;
pub mod orchestrator;
pub mod planner;
pub mod reviewer;

pub use base::{Agent, LlmAgent};
pub use coder::CoderAgent;
pub use extract::extract_code;
pub use orchestrator::{Orchestrator, RunReport};
pub use planner::PlannerAgent;
pub use reviewer::ReviewerAgent;

#[cfg(test)]
pub(crate) mod test_helpers;
