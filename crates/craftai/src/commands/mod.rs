//! CLI command handlers.

pub mod agent;
pub mod config;
pub mod context;
pub mod decision;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use craftai_client::CraftClient;
use craftai_config::{ConfigOption, Settings};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Settings given as command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub owner: Option<String>,
    pub token: Option<String>,
}

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit config file, if given.
    pub config_path: Option<PathBuf>,
    /// Flag overrides applied last.
    pub overrides: Overrides,
    /// Output as JSON for scripting.
    pub json_output: bool,
}

impl Context {
    /// Resolve settings: defaults, config file, environment, then flags.
    pub fn settings(&self) -> Result<Settings> {
        let loaded = craftai_config::load_settings(self.config_path.as_deref())?;
        if let (true, Some(path)) = (loaded.loaded, &loaded.path) {
            tracing::debug!(path = %path.display(), "using config file");
        }

        let mut settings = loaded.settings;
        let flags = [
            (ConfigOption::Url, &self.overrides.url),
            (ConfigOption::Owner, &self.overrides.owner),
            (ConfigOption::Token, &self.overrides.token),
        ];
        for (option, value) in flags {
            if let Some(value) = value {
                settings
                    .set(option, value)
                    .with_context(|| format!("invalid --{} flag", option))?;
            }
        }
        Ok(settings)
    }

    /// Build an API client from the resolved settings.
    pub fn client(&self) -> Result<CraftClient> {
        let settings = self.settings()?;
        let Some(owner) = settings.owner else {
            bail!("no owner configured; pass --owner, set CRAFT_OWNER, or run `craftai config set owner <name>`");
        };

        let mut builder = CraftClient::builder().base_url(settings.url).owner(owner);
        if let Some(token) = settings.token {
            builder = builder.token(token);
        }
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

/// Current unix time, the default for `--at`.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Render a unix timestamp as RFC 3339.
pub fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read and parse a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}
