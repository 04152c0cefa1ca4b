use std::path::PathBuf;

use clap::Parser;

use rslacker::config::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH};

/// Run a command and report its outcome to a Slack webhook.
#[derive(Parser, Debug)]
#[command(name = "rslacker", version, about, long_about = None)]
#[command(after_help = format!(
    "When {CONFIG_ENV_VAR} is set and non-empty its content is used as the \
     configuration and no config file is read."
))]
pub struct Args {
    /// Path to the TOML config file
    #[arg(value_name = "CONFIG", conflicts_with = "config")]
    pub config_path: Option<PathBuf>,

    /// Path to the TOML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration without running the program or notifying
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Config file to read when the environment does not provide one.
    pub fn config_file(&self) -> PathBuf {
        self.config
            .clone()
            .or_else(|| self.config_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
