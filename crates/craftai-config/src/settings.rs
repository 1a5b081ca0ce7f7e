//! Client settings and the options that address them.
//!
//! ```toml
//! url = "https://beta.craft.ai"
//! owner = "gisele"
//! token = "eyJhbGciOi..."
//! timeout = 30
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConfigError, Result};

/// Default craft ai API location.
pub const DEFAULT_URL: &str = "https://beta.craft.ai";

/// Environment variables read on top of the config file, by option.
pub const ENV_VARS: [(&str, ConfigOption); 4] = [
    ("CRAFT_URL", ConfigOption::Url),
    ("CRAFT_OWNER", ConfigOption::Owner),
    ("CRAFT_TOKEN", ConfigOption::Token),
    ("CRAFT_TIMEOUT", ConfigOption::Timeout),
];

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// A single configurable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    /// Bearer token sent with every request.
    Token,
    /// Owner namespace requests are scoped to.
    Owner,
    /// API location.
    Url,
    /// Request timeout, in seconds.
    Timeout,
}

impl ConfigOption {
    /// Every option, in display order.
    pub const ALL: [ConfigOption; 4] = [
        ConfigOption::Url,
        ConfigOption::Owner,
        ConfigOption::Token,
        ConfigOption::Timeout,
    ];

    /// The option's name in files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigOption::Token => "token",
            ConfigOption::Owner => "owner",
            ConfigOption::Url => "url",
            ConfigOption::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigOption {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(ConfigOption::Token),
            "owner" => Ok(ConfigOption::Owner),
            "url" => Ok(ConfigOption::Url),
            "timeout" => Ok(ConfigOption::Timeout),
            _ => Err(ConfigError::UnknownOption(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Everything needed to build a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// API location.
    #[serde(default = "default_url")]
    pub url: String,

    /// Owner namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: default_url(),
            owner: None,
            token: None,
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Parse from a TOML string and validate the result.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against the rules [`Settings::set`] enforces.
    pub fn validate(&self) -> Result<()> {
        check_url(&self.url)?;
        if let Some(owner) = &self.owner {
            check_not_empty(ConfigOption::Owner, owner)?;
        }
        if let Some(token) = &self.token {
            check_not_empty(ConfigOption::Token, token)?;
        }
        if let Some(secs) = self.timeout_secs {
            check_timeout(secs)?;
        }
        Ok(())
    }

    /// Set an option from its string form.
    pub fn set(&mut self, option: ConfigOption, value: &str) -> Result<()> {
        let value = value.trim();
        match option {
            ConfigOption::Url => {
                check_url(value)?;
                self.url = value.to_string();
            }
            ConfigOption::Owner => {
                check_not_empty(option, value)?;
                self.owner = Some(value.to_string());
            }
            ConfigOption::Token => {
                check_not_empty(option, value)?;
                self.token = Some(value.to_string());
            }
            ConfigOption::Timeout => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| invalid(option, "must be a whole number of seconds"))?;
                check_timeout(secs)?;
                self.timeout_secs = Some(secs);
            }
        }
        Ok(())
    }

    /// Get an option's current value, if set.
    pub fn get(&self, option: ConfigOption) -> Option<String> {
        match option {
            ConfigOption::Url => Some(self.url.clone()),
            ConfigOption::Owner => self.owner.clone(),
            ConfigOption::Token => self.token.clone(),
            ConfigOption::Timeout => self.timeout_secs.map(|s| s.to_string()),
        }
    }

    /// Clear an option. The URL falls back to [`DEFAULT_URL`].
    pub fn unset(&mut self, option: ConfigOption) {
        match option {
            ConfigOption::Url => self.url = default_url(),
            ConfigOption::Owner => self.owner = None,
            ConfigOption::Token => self.token = None,
            ConfigOption::Timeout => self.timeout_secs = None,
        }
    }

    /// Apply `CRAFT_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply `CRAFT_*` variables resolved through `lookup`. Empty values are
    /// ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, option) in ENV_VARS {
            if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                debug!(var, option = %option, "config from environment");
                self.set(option, &value)?;
            }
        }
        Ok(())
    }

    /// Copy suitable for display, with the token masked.
    pub fn redacted(&self) -> Self {
        Self {
            token: self.token.as_deref().map(mask),
            ..self.clone()
        }
    }
}

fn invalid(option: ConfigOption, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        reason: reason.to_string(),
    }
}

fn check_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(invalid(ConfigOption::Url, "must start with http:// or https://"))
    }
}

fn check_not_empty(option: ConfigOption, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(option, "must not be empty"));
    }
    Ok(())
}

fn check_timeout(secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(invalid(ConfigOption::Timeout, "must be positive"));
    }
    Ok(())
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 8 {
        "********".to_string()
    } else {
        format!("{}********", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_option_parsing() {
        assert_eq!("token".parse::<ConfigOption>().unwrap(), ConfigOption::Token);
        assert_eq!("OWNER".parse::<ConfigOption>().unwrap(), ConfigOption::Owner);
        assert_eq!(" url ".parse::<ConfigOption>().unwrap(), ConfigOption::Url);
        assert_eq!("timeout".parse::<ConfigOption>().unwrap(), ConfigOption::Timeout);

        let err = "hey".parse::<ConfigOption>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption(ref o) if o == "hey"));
    }

    #[test]
    fn test_option_names_round_trip() {
        for option in ConfigOption::ALL {
            assert_eq!(option.as_str().parse::<ConfigOption>().unwrap(), option);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.get(ConfigOption::Owner), None);
        assert_eq!(settings.get(ConfigOption::Token), None);
        assert_eq!(settings.get(ConfigOption::Timeout), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut settings = Settings::default();
        settings
            .set(
                ConfigOption::Token,
                "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0.TJVA95Or",
            )
            .unwrap();
        settings.set(ConfigOption::Owner, "gisele").unwrap();
        settings.set(ConfigOption::Url, "https://foo.example.com").unwrap();
        settings.set(ConfigOption::Timeout, "45").unwrap();

        assert_eq!(settings.get(ConfigOption::Owner).as_deref(), Some("gisele"));
        assert_eq!(
            settings.get(ConfigOption::Url).as_deref(),
            Some("https://foo.example.com")
        );
        assert_eq!(settings.get(ConfigOption::Timeout).as_deref(), Some("45"));
        assert!(settings.get(ConfigOption::Token).unwrap().starts_with("eyJ"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set(ConfigOption::Url, "foo.example.com").is_err());
        assert!(settings.set(ConfigOption::Owner, "  ").is_err());
        assert!(settings.set(ConfigOption::Timeout, "soon").is_err());
        assert!(settings.set(ConfigOption::Timeout, "0").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unset_restores_default_url() {
        let mut settings = Settings::default();
        settings.set(ConfigOption::Url, "http://localhost:9000").unwrap();
        settings.set(ConfigOption::Owner, "gisele").unwrap();

        settings.unset(ConfigOption::Url);
        settings.unset(ConfigOption::Owner);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = Settings::from_toml(
            r#"
url = "http://localhost:9000"
owner = "gisele"
timeout = 10
"#,
        )
        .unwrap();
        assert_eq!(settings.url, "http://localhost:9000");
        assert_eq!(settings.timeout_secs, Some(10));
        assert_eq!(settings.token, None);

        let back = Settings::from_toml(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        let cases = [
            ("url = \"ftp://nope\"", "url"),
            ("owner = \"\"", "owner"),
            ("token = \"  \"", "token"),
            ("timeout = 0", "timeout"),
        ];
        for (toml_str, field) in cases {
            let err = Settings::from_toml(toml_str).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref option, .. } if option == field),
                "{}: {:?}",
                toml_str,
                err
            );
        }
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        settings.set(ConfigOption::Owner, "gisele").unwrap();
        settings.set(ConfigOption::Timeout, "5").unwrap();
        settings.validate().unwrap();

        settings.timeout_secs = Some(0);
        assert!(matches!(
            settings.validate().unwrap_err(),
            ConfigError::InvalidValue { ref option, .. } if option == "timeout"
        ));
    }

    #[test]
    fn test_apply_env_with() {
        let env: HashMap<&str, &str> = [
            ("CRAFT_OWNER", "gisele"),
            ("CRAFT_TOKEN", ""),
            ("CRAFT_TIMEOUT", "5"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.token = Some("from-file".to_string());
        settings
            .apply_env_with(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.owner.as_deref(), Some("gisele"));
        assert_eq!(settings.token.as_deref(), Some("from-file"));
        assert_eq!(settings.timeout_secs, Some(5));
        assert_eq!(settings.url, DEFAULT_URL);
    }

    #[test]
    fn test_apply_env_with_invalid_value() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env_with(|var| (var == "CRAFT_URL").then(|| "ftp://nope".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_redacted_masks_token() {
        let mut settings = Settings::default();
        settings.token = Some("eyJhbGciOiJIUzI1NiJ9".to_string());
        assert_eq!(settings.redacted().token.as_deref(), Some("eyJh********"));

        settings.token = Some("short".to_string());
        assert_eq!(settings.redacted().token.as_deref(), Some("********"));
        assert_eq!(settings.redacted().url, settings.url);
    }
}
