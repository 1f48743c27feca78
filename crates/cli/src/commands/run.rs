//! `agentboard run` — Solve one task with the planner → coder → reviewer pipeline.

use std::sync::Arc;

use agentboard_agent::Orchestrator;
use agentboard_config::AppConfig;
use agentboard_core::blackboard::Blackboard;
use agentboard_core::event::{DomainEvent, EventBus};
use tokio::sync::Notify;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub async fn run(task: String, no_review: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(agentboard_core::Error::from)?;
    if no_review {
        config.agents.review = false;
    }

    // Local servers (ollama, vllm, ...) run without a key; hosted ones don't.
    if config.api_key.is_none() && is_hosted(&config.default_provider) {
        eprintln!();
        eprintln!("  ERROR: No API key configured for '{}'!", config.default_provider);
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    AGENTBOARD_API_KEY=sk-...      (generic)");
        eprintln!("    OPENROUTER_API_KEY=sk-or-...   (recommended)");
        eprintln!("    OPENAI_API_KEY=sk-...          (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let router = agentboard_providers::router::build_from_config(&config)
        .map_err(agentboard_core::Error::from)?;
    let provider = router.default().ok_or("No default provider configured")?;
    debug!(providers = ?router.list(), "Providers registered");
    info!(
        provider = %config.default_provider,
        model = %config.effective_model(),
        review = config.agents.review,
        "Starting run"
    );

    let event_bus = Arc::new(EventBus::new(config.events.capacity));
    let board = Arc::new(Blackboard::new().with_event_bus(event_bus.clone()));

    // Progress goes to stderr so stdout stays clean for the result.
    let done = Arc::new(Notify::new());
    let progress = spawn_progress(event_bus.subscribe(), done.clone());

    let orchestrator = Orchestrator::from_config(board.clone(), provider, &config);
    let outcome = orchestrator.run(&task).await;

    done.notify_one();
    if let Err(e) = progress.await {
        warn!(error = %e, "Progress printer stopped abnormally");
    }

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            warn!(board = %board.id(), messages = board.len(), error = %e, "Run failed");
            if json {
                println!("{}", board.snapshot().to_json_pretty()?);
            }
            return Err(e.into());
        }
    };

    info!(board = %report.board_id, messages = board.len(), "Run finished");

    if json {
        println!("{}", board.snapshot().to_json_pretty()?);
        return Ok(());
    }

    println!("{}", report.code);
    if let Some(review) = report.review {
        println!();
        println!("--- review ---");
        println!("{}", review.content());
    }

    Ok(())
}

/// Print `MessagePosted` events until the bus closes or `done` fires,
/// then drain what is already queued. Returns how many events it printed.
fn spawn_progress(
    mut rx: broadcast::Receiver<Arc<DomainEvent>>,
    done: Arc<Notify>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut printed = 0;
        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Ok(event) => printed += print_progress(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Progress printer lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = done.notified() => {
                    while let Ok(event) = rx.try_recv() {
                        printed += print_progress(&event);
                    }
                    break;
                }
            }
        }
        printed
    })
}

fn print_progress(event: &DomainEvent) -> usize {
    match event {
        DomainEvent::MessagePosted { sequence, sender, kind, .. } => {
            eprintln!("  [{sequence}] {sender} posted {kind}");
            1
        }
        DomainEvent::TaskSet { .. } => 0,
    }
}

fn is_hosted(provider: &str) -> bool {
    !matches!(provider, "ollama" | "vllm" | "llamacpp" | "llama.cpp")
}
