//! End-to-end tests for the planner → coder → reviewer pipeline.
//!
//! These drive the real agents and blackboard with a scripted provider in
//! place of the network.

use std::sync::{Arc, Mutex};

use agentboard_agent::{CoderAgent, LlmAgent, Orchestrator, PlannerAgent};
use agentboard_config::AppConfig;
use agentboard_core::error::ProviderError;
use agentboard_core::event::{DomainEvent, EventBus};
use agentboard_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use agentboard_core::{Blackboard, Error, MessageKind};

// ── Mock Provider ────────────────────────────────────────────────────────

/// Answers each call with the next scripted text and keeps the prompts.
struct ScriptedProvider {
    responses: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|r| r.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut prompts = self.prompts.lock().unwrap();
        let Some(content) = self.responses.get(prompts.len()).cloned() else {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: "script exhausted".into(),
            });
        };
        prompts.push(
            request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default(),
        );

        Ok(ProviderResponse {
            content,
            model: request.model,
            usage: Some(Usage {
                prompt_tokens: 12,
                completion_tokens: 8,
                total_tokens: 20,
            }),
        })
    }
}

const PLAN: &str = "1. Take the input string\n2. Return it reversed with slicing";
const CODE_REPLY: &str = "Here you go:\n```python\ndef reverse_string(s):\n    return s[::-1]\n```\nDone.";
const REVIEW: &str = "Correct. Handles the empty string too.";

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reverse_string_task_runs_end_to_end() {
    let provider = Arc::new(ScriptedProvider::new(&[PLAN, CODE_REPLY, REVIEW]));
    let board = Arc::new(Blackboard::new());
    let orchestrator = Orchestrator::from_config(board.clone(), provider.clone(), &AppConfig::default());

    let report = orchestrator
        .run("Write a function to reverse a string")
        .await
        .unwrap();

    assert_eq!(report.code, "def reverse_string(s):\n    return s[::-1]");
    assert_eq!(report.plan.content(), PLAN);
    assert_eq!(report.review.unwrap().content(), REVIEW);

    // The coder saw the task and the plan the planner posted.
    let coder_prompt = provider.prompt(1);
    assert!(coder_prompt.contains("Write a function to reverse a string"));
    assert!(coder_prompt.contains("Return it reversed with slicing"));

    // The reviewer saw the extracted code, not the surrounding chatter.
    let review_prompt = provider.prompt(2);
    assert!(review_prompt.contains("return s[::-1]"));
    assert!(!review_prompt.contains("Here you go"));

    let latest_plan = board.get_latest_by_type(MessageKind::Plan).unwrap();
    assert_eq!(latest_plan.sender(), "planner");
    assert_eq!(latest_plan.sequence(), 1);

    let code = board.get_latest_by_type(MessageKind::Code).unwrap();
    assert_eq!(code.sender(), "coder");
    assert_eq!(code.content(), report.code);
}

#[tokio::test]
async fn sessions_on_separate_boards_stay_isolated() {
    let first = Arc::new(Blackboard::new());
    let second = Arc::new(Blackboard::new());
    let mut config = AppConfig::default();
    config.agents.review = false;

    Orchestrator::from_config(first.clone(), Arc::new(ScriptedProvider::new(&[PLAN, CODE_REPLY])), &config)
        .run("reverse a string")
        .await
        .unwrap();
    Orchestrator::from_config(second.clone(), Arc::new(ScriptedProvider::new(&["1. add", "a + b"])), &config)
        .run("add two numbers")
        .await
        .unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(first.current_task(), "reverse a string");
    assert_eq!(second.current_task(), "add two numbers");
    assert_eq!(second.get_latest_by_type(MessageKind::Code).unwrap().content(), "a + b");
    assert!(first
        .get_all_by_type(MessageKind::Code)
        .iter()
        .all(|m| m.content().contains("reverse_string")));
}

#[tokio::test]
async fn provider_failure_mid_run_keeps_partial_transcript() {
    // The coder call finds the script exhausted.
    let provider = Arc::new(ScriptedProvider::new(&[PLAN]));
    let board = Arc::new(Blackboard::new());

    let err = Orchestrator::from_config(board.clone(), provider.clone(), &AppConfig::default())
        .run("reverse a string")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Provider(ProviderError::ApiError { status_code: 500, .. })));
    assert_eq!(provider.calls(), 1);

    let kinds: Vec<MessageKind> = board.messages().iter().map(|m| m.kind()).collect();
    assert_eq!(kinds, vec![MessageKind::Task, MessageKind::Plan]);
    assert!(board.get_latest_by_type(MessageKind::Code).is_none());
}

#[tokio::test]
async fn observers_see_every_post_in_order() {
    let bus = Arc::new(EventBus::new(16));
    let mut rx = bus.subscribe();
    let board = Arc::new(Blackboard::new().with_event_bus(bus.clone()));

    let provider = Arc::new(ScriptedProvider::new(&[PLAN, CODE_REPLY, REVIEW]));
    Orchestrator::from_config(board.clone(), provider, &AppConfig::default())
        .run("reverse a string")
        .await
        .unwrap();

    let mut posted = Vec::new();
    let mut saw_task = false;
    while let Ok(event) = rx.try_recv() {
        match event.as_ref() {
            DomainEvent::TaskSet { task, board_id, .. } => {
                assert_eq!(*board_id, board.id().to_string());
                assert_eq!(task, "reverse a string");
                saw_task = true;
            }
            DomainEvent::MessagePosted { sequence, sender, kind, .. } => {
                posted.push((*sequence, sender.clone(), *kind));
            }
        }
    }

    assert!(saw_task);
    assert_eq!(
        posted,
        vec![
            (0, "orchestrator".to_string(), MessageKind::Task),
            (1, "planner".to_string(), MessageKind::Plan),
            (2, "coder".to_string(), MessageKind::Code),
            (3, "reviewer".to_string(), MessageKind::Review),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_pipelines_share_one_board() {
    let board = Arc::new(Blackboard::new());
    board.set_task("shared task");

    let mut handles = Vec::new();
    for i in 0..8 {
        let board = board.clone();
        handles.push(tokio::spawn(async move {
            let provider = Arc::new(ScriptedProvider::new(&["plan", "x = 1"]));
            let planner = PlannerAgent::new(Arc::new(LlmAgent::new(
                format!("planner-{i}"),
                provider.clone(),
                "mock-model",
                "Plan.",
            )));
            let coder = CoderAgent::new(Arc::new(LlmAgent::new(
                format!("coder-{i}"),
                provider,
                "mock-model",
                "Code.",
            )));
            planner.create_plan(&board).await.unwrap();
            coder.generate_code("shared task", &board).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let messages = board.messages();
    assert_eq!(messages.len(), 16);
    for (index, message) in messages.iter().enumerate() {
        assert_eq!(message.sequence(), index as u64);
    }
    assert_eq!(board.get_all_by_type(MessageKind::Plan).len(), 8);
    assert_eq!(board.get_all_by_type(MessageKind::Code).len(), 8);
}
