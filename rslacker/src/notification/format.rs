use super::{Notification, Severity};
use crate::config::{Config, Level};
use crate::runner::RunOutcome;

pub const OK_GLYPH: &str = ":large_blue_circle:";
pub const ERROR_GLYPH: &str = ":red_circle:";

/// Name shown for the program: the configured name, or the program path as inline code.
pub fn label(config: &Config) -> String {
    match &config.name {
        Some(name) => name.clone(),
        None => format!("`{}`", config.prog),
    }
}

/// Build the notification for `outcome`, or `None` when `config.level` suppresses it.
pub fn format(config: &Config, outcome: &RunOutcome) -> Option<Notification> {
    let has_output = !outcome.output().trim().is_empty();

    let emit = match config.level {
        Level::Always => true,
        Level::ErrorOrOutput => !outcome.is_success() || has_output,
        Level::Error => !outcome.is_success(),
    };
    if !emit {
        return None;
    }

    let severity = match outcome {
        RunOutcome::Success { .. } => Severity::Ok,
        RunOutcome::Failure { exit_code, .. } => Severity::Error {
            exit_code: *exit_code,
        },
    };

    Some(Notification {
        severity,
        label: label(config),
        output: has_output.then(|| outcome.output().to_string()),
    })
}
