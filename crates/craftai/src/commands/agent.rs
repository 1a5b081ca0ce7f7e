//! Agent command - create, inspect and delete agents.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};
use craftai_client::{Agent, Model};

use super::{Context, format_timestamp, print_json, read_json_file};

/// Arguments for the agent command.
#[derive(Args, Debug)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Create an agent from a JSON model file
    Create {
        /// Model file (`{"context": {...}, "output": [...], "time_quantum": 60}`)
        #[arg(short, long)]
        model: PathBuf,

        /// Agent ID (generated by the service when omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Show an agent's model and operation span
    Get {
        /// Agent ID
        id: String,
    },

    /// Delete an agent
    Delete {
        /// Agent ID
        id: String,

        /// Succeed when the agent does not exist
        #[arg(long)]
        ignore_missing: bool,
    },
}

/// Run the agent command.
pub async fn run(args: AgentArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let green = Style::new().green();
    let dim = Style::new().dim();

    match args.command {
        AgentCommand::Create { model, id } => {
            let model: Model = read_json_file(&model)?;
            let agent = client.agents().create(&model, id.as_deref()).await?;
            if ctx.json_output {
                print_json(&agent)?;
            } else {
                println!("{} Agent created: {}", green.apply_to("✓"), agent.id);
            }
        }
        AgentCommand::Get { id } => {
            let agent = client.agents().get(&id).await?;
            if ctx.json_output {
                print_json(&agent)?;
            } else {
                print_agent(&agent);
            }
        }
        AgentCommand::Delete { id, ignore_missing } => {
            match client.agents().delete(&id).await {
                Ok(()) => {}
                Err(e) if ignore_missing && e.is_not_found() => {
                    tracing::debug!(agent = %id, "agent already absent");
                }
                Err(e) => return Err(e.into()),
            }
            if ctx.json_output {
                print_json(&serde_json::json!({ "deleted": id }))?;
            } else {
                println!("{} Agent deleted: {}", green.apply_to("✓"), dim.apply_to(&id));
            }
        }
    }

    Ok(())
}

fn print_agent(agent: &Agent) {
    let dim = Style::new().dim();
    let cyan = Style::new().cyan();

    println!();
    println!("{}", style(format!("Agent {}", agent.id)).bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();

    for (name, definition) in &agent.model.context {
        let kind = serde_json::to_value(definition.property_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let marker = if agent.model.output.contains(name) {
            cyan.apply_to(" (output)").to_string()
        } else {
            String::new()
        };
        let generated = if definition.is_generated {
            dim.apply_to(" generated").to_string()
        } else {
            String::new()
        };
        println!("  {} {}{}{}", name, dim.apply_to(kind), generated, marker);
    }

    println!();
    if let Some(quantum) = agent.model.time_quantum {
        println!("  {} {}s", dim.apply_to("Time quantum:"), quantum);
    }
    if let Some(first) = agent.first_timestamp {
        println!("  {} {}", dim.apply_to("First operation:"), format_timestamp(first));
    }
    if let Some(last) = agent.last_timestamp {
        println!("  {} {}", dim.apply_to("Last operation:"), format_timestamp(last));
    }
    println!();
}
