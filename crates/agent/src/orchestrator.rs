//! Orchestrator — drives the planner → coder → reviewer sequence.
//!
//! # Flow
//!
//! ```text
//! task ──► Blackboard ◄──────────────┐
//!             │  ▲                    │
//!   get task  │  │ post PLAN          │
//!             ▼  │                    │
//!          ┌─────────┐   ┌───────┐   ┌──────────┐
//!          │ Planner │   │ Coder │   │ Reviewer │
//!          └─────────┘   └───────┘   └──────────┘
//!                 latest PLAN ─►  latest CODE ─►
//! ```
//!
//! Agents never see each other; each reads what it needs from the board.

use std::sync::Arc;

use agentboard_config::AppConfig;
use agentboard_core::blackboard::{Blackboard, BoardId};
use agentboard_core::error::{AgentError, Result};
use agentboard_core::message::{Message, MessageKind};
use agentboard_core::provider::Provider;
use serde::Serialize;
use tracing::info;

use crate::base::LlmAgent;
use crate::coder::{CODER_SYSTEM_PROMPT, CoderAgent};
use crate::planner::{PLANNER_SYSTEM_PROMPT, PlannerAgent};
use crate::reviewer::{REVIEWER_SYSTEM_PROMPT, ReviewerAgent};

/// Sender name the orchestrator uses for the task message.
pub const ORCHESTRATOR_SENDER: &str = "orchestrator";

/// What one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Session the run was recorded on.
    pub board_id: BoardId,
    /// The plan the coder worked from.
    pub plan: Message,
    /// Extracted code.
    pub code: String,
    /// Reviewer feedback, when a reviewer is configured.
    pub review: Option<Message>,
}

/// Runs a fixed agent sequence over one shared blackboard.
pub struct Orchestrator {
    board: Arc<Blackboard>,
    planner: PlannerAgent,
    coder: CoderAgent,
    reviewer: Option<ReviewerAgent>,
}

impl Orchestrator {
    pub fn new(board: Arc<Blackboard>, planner: PlannerAgent, coder: CoderAgent) -> Self {
        Self {
            board,
            planner,
            coder,
            reviewer: None,
        }
    }

    pub fn with_reviewer(mut self, reviewer: ReviewerAgent) -> Self {
        self.reviewer = Some(reviewer);
        self
    }

    /// Build the standard pipeline with every role backed by `provider`.
    pub fn from_config(
        board: Arc<Blackboard>,
        provider: Arc<dyn Provider>,
        config: &AppConfig,
    ) -> Self {
        let agents = &config.agents;
        let llm = |name: &str, prompt: &Option<String>, default: &str| {
            Arc::new(
                LlmAgent::new(
                    name,
                    provider.clone(),
                    config.effective_model(),
                    prompt.as_deref().unwrap_or(default),
                )
                .with_temperature(config.default_temperature)
                .with_max_tokens(config.default_max_tokens),
            )
        };

        let planner = PlannerAgent::new(llm("planner", &agents.planner_prompt, PLANNER_SYSTEM_PROMPT));
        let coder = CoderAgent::new(llm("coder", &agents.coder_prompt, CODER_SYSTEM_PROMPT))
            .with_plan_excerpt_chars(agents.plan_excerpt_chars);

        let orchestrator = Self::new(board, planner, coder);
        if agents.review {
            orchestrator.with_reviewer(ReviewerAgent::new(llm(
                "reviewer",
                &agents.reviewer_prompt,
                REVIEWER_SYSTEM_PROMPT,
            )))
        } else {
            orchestrator
        }
    }

    /// Set `task` on the board and run every agent in turn.
    ///
    /// An agent failure aborts the run; whatever was posted before it stays
    /// on the board.
    pub async fn run(&self, task: &str) -> Result<RunReport> {
        let board = self.board.as_ref();

        info!(
            board = %board.id(),
            reviewer = self.reviewer.is_some(),
            "Orchestrator: starting run"
        );

        board.set_task(task);
        board.post(ORCHESTRATOR_SENDER, task, MessageKind::Task);

        let plan = self.planner.create_plan(board).await?;
        let code = self.coder.generate_code(&board.current_task(), board).await?;

        let review = match &self.reviewer {
            Some(reviewer) => {
                let review = reviewer.review(&board.current_task(), board).await?;
                if review.is_none() {
                    return Err(AgentError::MissingInput {
                        agent: reviewer.name().to_string(),
                        kind: MessageKind::Code,
                    }
                    .into());
                }
                review
            }
            None => None,
        };

        info!(board = %board.id(), messages = board.len(), "Orchestrator: run complete");

        Ok(RunReport {
            board_id: board.id().clone(),
            plan,
            code,
            review,
        })
    }
}
