//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading and updates.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a config file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Option name is not one of the known settings.
    #[error("unknown config option '{0}' (expected token, owner, url or timeout)")]
    UnknownOption(String),

    /// Value cannot be used for the option.
    #[error("invalid value for {option}: {reason}")]
    InvalidValue { option: String, reason: String },

    /// No usable config directory on this platform.
    #[error("no config directory available; set CRAFTAI_CONFIG_DIR or pass --config")]
    NoConfigDir,
}
