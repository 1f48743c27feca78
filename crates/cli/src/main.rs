//! Agentboard CLI — the main entry point.
//!
//! Commands:
//! - `run`     — Plan, code and review a task through a fresh blackboard
//! - `config`  — Show the effective configuration
//! - `kinds`   — List the message kinds agents can post

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "agentboard",
    about = "Agentboard — multi-agent coding over a shared blackboard",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the planner → coder → reviewer pipeline on a task
    Run {
        /// The problem statement to solve
        #[arg(short, long)]
        task: String,

        /// Skip the reviewer even if enabled in config
        #[arg(long)]
        no_review: bool,

        /// Print the full blackboard transcript as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration (secrets redacted)
    Config,

    /// List message kinds
    Kinds,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { task, no_review, json } => commands::run::run(task, no_review, json).await?,
        Commands::Config => commands::config_cmd::show()?,
        Commands::Kinds => commands::kinds::run(),
    }

    Ok(())
}
