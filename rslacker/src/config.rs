//! Configuration loading.
//!
//! A configuration comes from exactly one source: the content of the
//! [`CONFIG_ENV_VAR`] environment variable when it is set and non-empty,
//! otherwise the TOML file at the given path. The two are never merged.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, ConfigOrigin};

/// Environment variable carrying a full configuration document.
pub const CONFIG_ENV_VAR: &str = "RSLACKER_CONFIG";

/// Config file used when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

/// Which run outcomes produce a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Level {
    /// Notify after every run.
    #[default]
    Always,
    /// Notify on failure, or on success when the program printed something.
    #[serde(rename = "Error_Or_Output")]
    ErrorOrOutput,
    /// Notify on failure only.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Always => "Always",
            Self::ErrorOrOutput => "Error_Or_Output",
            Self::Error => "Error",
        };
        f.write_str(s)
    }
}

/// Slack destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlackConfig {
    /// Incoming webhook URL.
    pub hook: String,
}

/// A single run: which program to execute and where to report it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Display name used in the notification instead of the program path.
    #[serde(default)]
    pub name: Option<String>,
    /// Working directory of the program. Defaults to the current directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Program to execute.
    pub prog: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub level: Level,
    pub slack: SlackConfig,
}

impl Config {
    /// Check the values serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prog.trim().is_empty() {
            return Err(ConfigError::invalid("`prog` must not be empty"));
        }

        let hook = Url::parse(&self.slack.hook).map_err(|e| {
            ConfigError::invalid(format!("`slack.hook` is not a valid URL: {e}"))
        })?;
        if !matches!(hook.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(format!(
                "`slack.hook` must be an http(s) URL, got scheme `{}`",
                hook.scheme()
            )));
        }

        Ok(())
    }
}

/// Parse and validate a configuration document.
pub fn parse(content: &str, origin: ConfigOrigin) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(content).map_err(|source| ConfigError::Parse { origin, source })?;
    config.validate()?;
    Ok(config)
}

/// Resolve the configuration for this run.
///
/// `env_override` is the value of [`CONFIG_ENV_VAR`]. When it is non-empty it
/// is used exclusively and `path` is never touched.
pub fn resolve(path: &Path, env_override: Option<&str>) -> Result<Config, ConfigError> {
    if let Some(content) = env_override.filter(|c| !c.is_empty()) {
        debug!("Loading configuration from {}", CONFIG_ENV_VAR);
        return parse(content, ConfigOrigin::Environment);
    }

    if !path.exists() {
        return Err(ConfigError::Missing {
            path: path.to_path_buf(),
        });
    }

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, ConfigOrigin::File(path.to_path_buf()))
}
