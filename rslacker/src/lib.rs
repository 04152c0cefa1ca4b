//! rslacker library crate.
//!
//! Runs one configured program and reports how it went to a Slack webhook.
//! The `rslacker` binary (`src/main.rs`) is a thin wrapper around [`run`].

pub mod config;
pub mod error;
pub mod notification;
pub mod runner;
mod utils;

pub use config::{Config, Level};
pub use error::{ConfigError, DeliveryError, Error, Result};
pub use runner::RunOutcome;

use tracing::info;

use crate::notification::SlackChannel;

/// What a call to [`run`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Configuration was printed; nothing was executed or sent.
    DryRun,
    /// The program ran but the configured level suppressed the notification.
    Suppressed(RunOutcome),
    /// The program ran and the notification was delivered.
    Notified(RunOutcome),
}

/// Run the configured program and notify slack about it.
///
/// With `dry_run` set the configuration is printed to stdout and neither the
/// program nor the webhook is touched.
pub async fn run(config: &Config, dry_run: bool) -> Result<RunReport> {
    if dry_run {
        println!("running with config: {config:#?}");
        return Ok(RunReport::DryRun);
    }

    let channel = SlackChannel::new(config.slack.hook.as_str())?;

    let outcome = runner::run(&config.prog, &config.args, config.dir.as_deref()).await;
    info!(
        label = %notification::label(config),
        success = outcome.is_success(),
        "Program finished"
    );

    let Some(message) = notification::format(config, &outcome) else {
        info!("Notification suppressed by level {}", config.level);
        return Ok(RunReport::Suppressed(outcome));
    };

    channel.deliver(&message).await?;
    info!("Notification delivered");

    Ok(RunReport::Notified(outcome))
}
