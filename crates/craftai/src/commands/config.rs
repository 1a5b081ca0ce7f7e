//! Config command - inspect and edit the client configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};
use craftai_config::{ConfigError, ConfigOption, load_file_layer, save_settings};

use super::{Context, print_json};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings (file, environment and flags)
    Show,

    /// Print one effective setting
    Get {
        /// Option name: url, owner, token or timeout
        key: String,
    },

    /// Store a setting in the config file
    Set {
        /// Option name: url, owner, token or timeout
        key: String,

        /// New value
        value: String,
    },

    /// Remove a setting from the config file
    Unset {
        /// Option name: url, owner, token or timeout
        key: String,
    },

    /// Print the config file location
    Path,
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();
    let green = Style::new().green();

    match args.command {
        ConfigCommand::Show => {
            let settings = ctx.settings()?.redacted();
            if ctx.json_output {
                print_json(&settings)?;
            } else {
                println!("{}", style("craft ai configuration").bold());
                println!("{}", dim.apply_to("─".repeat(40)));
                for option in ConfigOption::ALL {
                    let value = settings
                        .get(option)
                        .unwrap_or_else(|| dim.apply_to("(not set)").to_string());
                    println!("  {} {}", dim.apply_to(format!("{}:", option)), value);
                }
            }
        }
        ConfigCommand::Get { key } => {
            let option: ConfigOption = key.parse()?;
            let settings = ctx.settings()?;
            match settings.get(option) {
                Some(value) => println!("{}", value),
                None => anyhow::bail!("{} is not set", option),
            }
        }
        ConfigCommand::Set { key, value } => {
            let option: ConfigOption = key.parse()?;
            let path = config_file(ctx)?;
            let mut loaded = load_file_layer(Some(&path))?;
            loaded.settings.set(option, &value)?;
            save_settings(&loaded.settings, &path)?;
            println!(
                "{} {} saved to {}",
                green.apply_to("✓"),
                option,
                dim.apply_to(path.display())
            );
        }
        ConfigCommand::Unset { key } => {
            let option: ConfigOption = key.parse()?;
            let path = config_file(ctx)?;
            let mut loaded = load_file_layer(Some(&path))?;
            loaded.settings.unset(option);
            save_settings(&loaded.settings, &path)?;
            println!(
                "{} {} removed from {}",
                green.apply_to("✓"),
                option,
                dim.apply_to(path.display())
            );
        }
        ConfigCommand::Path => {
            println!("{}", config_file(ctx)?.display());
        }
    }

    Ok(())
}

/// The file `set` and `unset` write to.
fn config_file(ctx: &Context) -> Result<PathBuf> {
    match &ctx.config_path {
        Some(path) => Ok(path.clone()),
        None => Ok(craftai_config::config_path().ok_or(ConfigError::NoConfigDir)?),
    }
}
