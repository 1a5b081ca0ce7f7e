//! Config file discovery and layered loading.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. `~/.config/craftai/config.toml` (or an explicit path)
//! 3. `CRAFT_*` environment variables
//! 4. CLI arguments (handled externally)

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ConfigError, Result, Settings};

/// Default config filename within the config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for config directory resolution.
const APP_NAME: &str = "craftai";

/// Environment variable to override the config directory.
const CONFIG_DIR_ENV: &str = "CRAFTAI_CONFIG_DIR";

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    /// The layered settings.
    pub settings: Settings,
    /// File that was checked, if any could be resolved.
    pub path: Option<PathBuf>,
    /// Whether that file existed and was loaded.
    pub loaded: bool,
}

/// Get the config directory for craftai.
///
/// Checks `CRAFTAI_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/craftai` on Linux).
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|d| d.join(APP_NAME)),
    }
}

/// Get the default config file path.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// Load settings: defaults, then the config file, then the environment.
///
/// `path` overrides the discovered config file. A missing file is not an
/// error; an unreadable or malformed one is.
pub fn load_settings(path: Option<&Path>) -> Result<LoadedSettings> {
    let mut loaded = load_file_layer(path)?;
    loaded.settings.apply_env()?;
    Ok(loaded)
}

/// Load defaults and the config file only, without the environment.
///
/// This is what `config set` edits, so environment values never leak into the
/// saved file.
pub fn load_file_layer(path: Option<&Path>) -> Result<LoadedSettings> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => config_path(),
    };

    let (settings, loaded) = match &path {
        Some(p) if p.is_file() => {
            debug!(path = %p.display(), "loading config file");
            (load_settings_file(p)?, true)
        }
        _ => (Settings::default(), false),
    };

    Ok(LoadedSettings {
        settings,
        path,
        loaded,
    })
}

/// Load settings from a specific file path (no discovery).
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Settings::from_toml(&contents)
}

/// Save settings to a file.
///
/// Creates parent directories if they don't exist.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = settings.to_toml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
