//! Tree and decide commands - read what an agent has learned.

use anyhow::{Context as _, Result};
use clap::Args;
use console::{Style, style};
use craftai_client::{Properties, Time};

use super::context::render_properties;
use super::{Context, format_timestamp, now, print_json};

/// Arguments for the tree command.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Agent ID
    pub id: String,

    /// Unix timestamp (default: now)
    #[arg(long)]
    pub at: Option<i64>,
}

/// Arguments for the decide command.
#[derive(Args, Debug)]
pub struct DecideArgs {
    /// Agent ID
    pub id: String,

    /// Context as a JSON object, e.g. '{"externalTemp": 12}'
    #[arg(short, long)]
    pub context: String,

    /// Unix timestamp (default: now)
    #[arg(long)]
    pub at: Option<i64>,

    /// UTC offset used for generated time properties (default: +00:00)
    #[arg(long)]
    pub tz: Option<String>,
}

/// Run the tree command.
pub async fn run_tree(args: TreeArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let timestamp = args.at.unwrap_or_else(now);
    let tree = client.decisions().tree(&args.id, timestamp).await?;

    if !ctx.json_output {
        let dim = Style::new().dim();
        println!(
            "{}",
            style(format!(
                "Decision tree for {} at {}",
                args.id,
                format_timestamp(timestamp)
            ))
            .bold()
        );
        if let Some(version) = tree.version() {
            println!("{}", dim.apply_to(format!("format {}", version)));
        }
        println!("{}", dim.apply_to("─".repeat(50)));
    }
    print_json(tree.as_json())
}

/// Run the decide command.
pub async fn run_decide(args: DecideArgs, ctx: &Context) -> Result<()> {
    let mut context: Properties =
        serde_json::from_str(&args.context).context("--context must be a JSON object")?;
    let timestamp = args.at.unwrap_or_else(now);
    let time = Time::new(timestamp, args.tz.as_deref())?;

    let client = ctx.client()?;
    let agent = client.agents().get(&args.id).await?;
    agent.model.fill_generated(&mut context, &time);
    tracing::debug!(context = %render_properties(&context), "decision context");

    let decision = client
        .decisions()
        .decide(&args.id, timestamp, &context)
        .await?;

    if ctx.json_output {
        return print_json(&decision);
    }

    let dim = Style::new().dim();
    let cyan = Style::new().cyan();
    println!(
        "{}",
        style(format!(
            "Decision for {} at {}",
            args.id,
            format_timestamp(timestamp)
        ))
        .bold()
    );
    println!("{}", dim.apply_to("─".repeat(50)));
    println!("  {} {}", dim.apply_to("Context:"), render_properties(&context));
    for (name, output) in &decision.output {
        let confidence = output
            .confidence
            .map(|c| format!(" ({:.0}% confidence)", c * 100.0))
            .unwrap_or_default();
        println!(
            "  {} {}{}",
            cyan.apply_to(format!("{}:", name)),
            output.predicted_value,
            dim.apply_to(confidence)
        );
    }
    Ok(())
}
