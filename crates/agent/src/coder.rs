//! Coder agent — writes code for the task, guided by the latest plan.

use std::sync::Arc;

use agentboard_core::blackboard::Blackboard;
use agentboard_core::error::{AgentError, Result};
use agentboard_core::message::MessageKind;
use tracing::{debug, info};

use crate::base::Agent;

/// Default system prompt for the coder role.
pub const CODER_SYSTEM_PROMPT: &str =
    "You are a coding agent. Output ONLY Python code in ```python blocks. No explanations.";

/// Default number of plan characters included in the coder prompt.
pub const DEFAULT_PLAN_EXCERPT_CHARS: usize = 800;

/// Reads the latest [`MessageKind::Plan`] (if any) and posts a
/// [`MessageKind::Code`].
pub struct CoderAgent {
    agent: Arc<dyn Agent>,
    plan_excerpt_chars: usize,
}

impl CoderAgent {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self {
            agent,
            plan_excerpt_chars: DEFAULT_PLAN_EXCERPT_CHARS,
        }
    }

    /// Cap how much of the plan goes into the prompt (keeps token use bounded).
    pub fn with_plan_excerpt_chars(mut self, chars: usize) -> Self {
        self.plan_excerpt_chars = chars;
        self
    }

    pub fn name(&self) -> &str {
        self.agent.name()
    }

    fn build_prompt(&self, task: &str, plan: Option<&str>) -> String {
        match plan {
            Some(plan) => format!(
                "Task: {task}\n\nPlan:\n{}\n\nWrite Python code. Output ONLY code in ```python block.",
                excerpt(plan, self.plan_excerpt_chars)
            ),
            None => format!("Task: {task}\n\nWrite Python code. Output ONLY code in ```python block."),
        }
    }

    /// Generate code for `task`, post it, and return it.
    ///
    /// Without a plan on the board the prompt carries the task alone.
    pub async fn generate_code(&self, task: &str, board: &Blackboard) -> Result<String> {
        let plan = board.get_latest_by_type(MessageKind::Plan);
        if plan.is_none() {
            debug!(agent = self.name(), board = %board.id(), "No plan on board, coding from task alone");
        }

        let prompt = self.build_prompt(task, plan.as_ref().map(|m| m.content()));
        let response = self.agent.generate(&prompt).await?;
        let code = self.agent.extract_code(&response);
        if code.trim().is_empty() {
            return Err(AgentError::EmptyResponse {
                agent: self.name().to_string(),
            }
            .into());
        }

        let posted = board.post(self.name(), code.clone(), MessageKind::Code);
        info!(
            agent = self.name(),
            board = %board.id(),
            sequence = posted.sequence(),
            lines = code.lines().count(),
            "Code posted"
        );

        Ok(code)
    }
}

/// The first `max_chars` characters of `text`, never splitting a char.
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
