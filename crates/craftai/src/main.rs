//! craftai - command-line client for the craft ai decision-tree service.
//!
//! Main entry point for the craftai CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{agent, config, context, decision};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// craftai - manage craft ai agents, context operations and decisions
#[derive(Parser)]
#[command(name = "craftai")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ~/.config/craftai/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API URL (default: https://beta.craft.ai)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Owner the agents belong to
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Bearer token
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Agent management
    Agent(agent::AgentArgs),

    /// Context operations and state
    Context(context::ContextArgs),

    /// Show an agent's decision tree
    Tree(decision::TreeArgs),

    /// Ask for a decision in a given context
    Decide(decision::DecideArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up CRAFT_* from a local .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        "craftai=debug,craftai_client=debug,craftai_config=debug,warn"
    } else {
        "craftai=info,craftai_client=info,craftai_config=info,warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let overrides = commands::Overrides {
        url: cli.url,
        owner: cli.owner,
        token: cli.token,
    };

    // Create context for commands
    let ctx = commands::Context {
        config_path: cli.config,
        overrides,
        json_output: cli.json,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Agent(args) => agent::run(args, &ctx).await,
        Commands::Context(args) => context::run(args, &ctx).await,
        Commands::Tree(args) => decision::run_tree(args, &ctx).await,
        Commands::Decide(args) => decision::run_decide(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx),
    }
}
