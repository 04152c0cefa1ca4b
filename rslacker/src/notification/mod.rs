//! Run notifications.
//!
//! - `format`: turns a run outcome into a [`Notification`] according to the
//!   configured [`Level`](crate::config::Level)
//! - `slack`: delivers a notification to a Slack incoming webhook

mod format;
mod slack;

pub use format::{ERROR_GLYPH, OK_GLYPH, format, label};
pub use slack::{SlackBlock, SlackChannel, SlackMessage, SlackText};

/// Whether the run the notification reports on succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Error { exit_code: Option<i32> },
}

/// A single message about one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub label: String,
    /// Program output, only present when it has non-whitespace content.
    pub output: Option<String>,
}

impl Notification {
    /// Render the Slack mrkdwn text of this notification.
    pub fn text(&self) -> String {
        let mut text = match self.severity {
            Severity::Ok => format!("{OK_GLYPH} {} ok", self.label),
            Severity::Error { exit_code } => {
                let code = exit_code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
                format!("{ERROR_GLYPH} {} failed (exit code {code})", self.label)
            }
        };

        if let Some(output) = &self.output {
            text.push_str("\n```");
            text.push_str(output);
            text.push_str("```");
        }

        text
    }
}
