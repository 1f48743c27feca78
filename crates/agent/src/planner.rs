//! Planner agent — turns the current task into a numbered plan.

use std::sync::Arc;

use agentboard_core::blackboard::Blackboard;
use agentboard_core::error::Result;
use agentboard_core::message::{Message, MessageKind};
use tracing::info;

use crate::base::Agent;

/// Default system prompt for the planner role.
pub const PLANNER_SYSTEM_PROMPT: &str = "You are a planning agent. Break the task into a short numbered list of implementation steps. Output ONLY the list.";

/// Reads the task from the blackboard and posts a [`MessageKind::Plan`].
pub struct PlannerAgent {
    agent: Arc<dyn Agent>,
}

impl PlannerAgent {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    pub fn name(&self) -> &str {
        self.agent.name()
    }

    fn build_prompt(task: &str) -> String {
        format!("Task: {task}\n\nWrite a concise numbered plan for implementing this in Python.")
    }

    /// Plan the board's current task and post the plan.
    pub async fn create_plan(&self, board: &Blackboard) -> Result<Message> {
        let task = board.current_task();
        let response = self.agent.generate(&Self::build_prompt(&task)).await?;
        let plan = response.trim();

        info!(agent = self.name(), board = %board.id(), chars = plan.len(), "Plan created");

        Ok(board.post(self.name(), plan, MessageKind::Plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LlmAgent;
    use crate::test_helpers::*;

    #[tokio::test]
    async fn posts_trimmed_plan_built_from_task() {
        let provider = Arc::new(SequentialMockProvider::texts(&["\n1. write function\n2. test it\n"]));
        let planner = PlannerAgent::new(Arc::new(LlmAgent::new(
            "planner",
            provider.clone(),
            "mock-model",
            PLANNER_SYSTEM_PROMPT,
        )));

        let board = Blackboard::new();
        board.set_task("reverse a string");
        let msg = planner.create_plan(&board).await.unwrap();

        assert_eq!(msg.kind(), MessageKind::Plan);
        assert_eq!(msg.sender(), "planner");
        assert_eq!(msg.content(), "1. write function\n2. test it");
        assert_eq!(board.get_latest_by_type(MessageKind::Plan), Some(msg));
        assert!(provider.prompt(0).starts_with("Task: reverse a string"));
    }

    #[tokio::test]
    async fn provider_failure_leaves_board_untouched() {
        let planner = PlannerAgent::new(Arc::new(LlmAgent::new(
            "planner",
            Arc::new(FailingProvider),
            "mock-model",
            PLANNER_SYSTEM_PROMPT,
        )));

        let board = Blackboard::new();
        board.set_task("anything");
        assert!(planner.create_plan(&board).await.is_err());
        assert!(board.is_empty());
    }
}
