//! Application-wide error types.

use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Notification error: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Where a configuration document was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Environment,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "config file {}", path.display()),
            Self::Environment => write!(f, "environment variable {}", crate::config::CONFIG_ENV_VAR),
        }
    }
}

/// Errors raised while resolving the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no config file at {} and {} is not set",
        .path.display(),
        crate::config::CONFIG_ENV_VAR
    )]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: ConfigOrigin,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Errors raised while delivering a notification to the webhook.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("could not encode slack message: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("slack request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("got unexpected response from slack ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_mentions_env_var() {
        let err = ConfigError::Missing {
            path: PathBuf::from("./config.toml"),
        };
        let msg = err.to_string();

        assert!(msg.contains("./config.toml"));
        assert!(msg.contains("RSLACKER_CONFIG"));
    }

    #[test]
    fn test_rejected_delivery_includes_body() {
        let err = Error::from(DeliveryError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "server error".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "Notification error: got unexpected response from slack (500 Internal Server Error): server error"
        );
    }
}
