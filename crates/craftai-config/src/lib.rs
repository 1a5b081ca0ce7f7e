//! Configuration system for the craft ai client.
//!
//! Provides TOML-based settings with:
//! - Named options (`token`, `owner`, `url`, `timeout`) settable from strings
//! - A user config file under the platform config directory
//! - `CRAFT_*` environment overrides layered on top

pub mod discovery;
pub mod error;
pub mod settings;

pub use discovery::{
    LoadedSettings, config_dir, config_path, load_file_layer, load_settings, load_settings_file,
    save_settings,
};
pub use error::{ConfigError, Result};
pub use settings::{ConfigOption, DEFAULT_URL, ENV_VARS, Settings};
