//! Reviewer agent — comments on the latest code against the task.

use std::sync::Arc;

use agentboard_core::blackboard::Blackboard;
use agentboard_core::error::Result;
use agentboard_core::message::{Message, MessageKind};
use tracing::{debug, info};

use crate::base::Agent;

/// Default system prompt for the reviewer role.
pub const REVIEWER_SYSTEM_PROMPT: &str = "You are a code reviewer. Point out bugs and missing edge cases in the code, briefly. If the code is correct, say so in one line.";

/// Reads the latest [`MessageKind::Code`] and posts a [`MessageKind::Review`].
pub struct ReviewerAgent {
    agent: Arc<dyn Agent>,
}

impl ReviewerAgent {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    pub fn name(&self) -> &str {
        self.agent.name()
    }

    fn build_prompt(task: &str, code: &str) -> String {
        format!("Task: {task}\n\nCode:\n```python\n{code}\n```\n\nReview this code.")
    }

    /// Review the latest code on the board.
    ///
    /// Returns `Ok(None)` without calling the model when there is no code yet.
    pub async fn review(&self, task: &str, board: &Blackboard) -> Result<Option<Message>> {
        let Some(code) = board.get_latest_by_type(MessageKind::Code) else {
            debug!(agent = self.name(), board = %board.id(), "No code on board, skipping review");
            return Ok(None);
        };

        let response = self
            .agent
            .generate(&Self::build_prompt(task, code.content()))
            .await?;

        let posted = board.post(self.name(), response.trim(), MessageKind::Review);
        info!(
            agent = self.name(),
            board = %board.id(),
            reviewed = code.sequence(),
            "Review posted"
        );

        Ok(Some(posted))
    }
}
