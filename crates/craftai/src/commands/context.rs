//! Context command - post and inspect context operations.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};
use craftai_client::{ContextOperation, ListOperationsQuery, Properties};

use super::{Context, format_timestamp, now, print_json, read_json_file};

/// Arguments for the context command.
#[derive(Args, Debug)]
pub struct ContextArgs {
    #[command(subcommand)]
    pub command: ContextCommand,
}

#[derive(Subcommand, Debug)]
pub enum ContextCommand {
    /// Post operations from a JSON file (an array of `{timestamp, context}`)
    Add {
        /// Agent ID
        id: String,

        /// Operations file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List operations previously posted
    List {
        /// Agent ID
        id: String,

        /// Only operations at or after this unix timestamp
        #[arg(long)]
        start: Option<i64>,

        /// Only operations at or before this unix timestamp
        #[arg(long)]
        end: Option<i64>,
    },

    /// Show the agent's context at a point in time
    State {
        /// Agent ID
        id: String,

        /// Unix timestamp (default: now)
        #[arg(long)]
        at: Option<i64>,
    },
}

/// Run the context command.
pub async fn run(args: ContextArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    match args.command {
        ContextCommand::Add { id, file } => {
            let operations: Vec<ContextOperation> = read_json_file(&file)?;
            client.context().add_operations(&id, &operations).await?;
            if ctx.json_output {
                print_json(&serde_json::json!({ "agent": id, "added": operations.len() }))?;
            } else {
                let green = Style::new().green();
                println!(
                    "{} Added {} operation(s) to {}",
                    green.apply_to("✓"),
                    operations.len(),
                    id
                );
            }
        }
        ContextCommand::List { id, start, end } => {
            let operations = if start.is_none() && end.is_none() {
                client.context().list_operations(&id).await?
            } else {
                client
                    .context()
                    .list_operations_with_query(&id, ListOperationsQuery { start, end })
                    .await?
            };

            if ctx.json_output {
                print_json(&operations)?;
            } else {
                println!("{}", style(format!("Operations for {}", id)).bold());
                println!("{}", dim.apply_to("─".repeat(50)));
                println!();

                if operations.is_empty() {
                    println!("{}", dim.apply_to("No operations found"));
                } else {
                    for operation in &operations {
                        println!(
                            "{} {}",
                            dim.apply_to(format_timestamp(operation.timestamp)),
                            render_properties(&operation.context)
                        );
                    }
                }
            }
        }
        ContextCommand::State { id, at } => {
            let timestamp = at.unwrap_or_else(now);
            let state = client.context().state(&id, timestamp).await?;
            if ctx.json_output {
                print_json(&state)?;
            } else {
                let at = state.timestamp.unwrap_or(timestamp);
                println!(
                    "{}",
                    style(format!("State of {} at {}", id, format_timestamp(at))).bold()
                );
                println!("{}", dim.apply_to("─".repeat(50)));
                for (name, value) in &state.context {
                    println!("  {} {}", dim.apply_to(format!("{}:", name)), value);
                }
            }
        }
    }

    Ok(())
}

/// Render properties on one line as `name=value` pairs.
pub(crate) fn render_properties(properties: &Properties) -> String {
    properties
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_properties() {
        let operation = ContextOperation::new(0)
            .with("temp", 20.5)
            .with("tz", "+02:00");
        assert_eq!(render_properties(&operation.context), "temp=20.5 tz=+02:00");
        assert_eq!(render_properties(&Properties::new()), "");
    }
}
