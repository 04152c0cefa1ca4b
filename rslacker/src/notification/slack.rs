//! Slack incoming webhook channel.
//!
//! A notification is sent as one Block Kit `section` holding mrkdwn text.
//! Delivery is a single POST; only a `200 OK` answer counts as delivered.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use super::Notification;
use crate::error::DeliveryError;
use crate::utils::http_client;

/// Body of an incoming webhook request.
#[derive(Debug, Serialize)]
pub struct SlackMessage {
    pub blocks: Vec<SlackBlock>,
}

#[derive(Debug, Serialize)]
pub struct SlackBlock {
    #[serde(rename = "type")]
    pub block_type: &'static str,
    pub text: SlackText,
}

#[derive(Debug, Serialize)]
pub struct SlackText {
    #[serde(rename = "type")]
    pub text_type: &'static str,
    pub text: String,
}

impl SlackMessage {
    /// Wrap `text` in a single mrkdwn section block.
    pub fn section(text: String) -> Self {
        Self {
            blocks: vec![SlackBlock {
                block_type: "section",
                text: SlackText {
                    text_type: "mrkdwn",
                    text,
                },
            }],
        }
    }
}

impl From<&Notification> for SlackMessage {
    fn from(notification: &Notification) -> Self {
        Self::section(notification.text())
    }
}

/// Delivers notifications to one Slack hook.
pub struct SlackChannel {
    hook: String,
    client: Client,
}

impl SlackChannel {
    /// Create a channel posting to `hook`.
    pub fn new(hook: impl Into<String>) -> Result<Self, DeliveryError> {
        Ok(Self {
            hook: hook.into(),
            client: http_client::build_client()?,
        })
    }

    /// Encode the request body for `notification`.
    pub fn build_payload(notification: &Notification) -> Result<Vec<u8>, DeliveryError> {
        Ok(serde_json::to_vec(&SlackMessage::from(notification))?)
    }

    /// Post `notification` to the hook once.
    pub async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let payload = Self::build_payload(notification)?;

        debug!(bytes = payload.len(), "Posting notification to slack");

        let response = self
            .client
            .post(&self.hook)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("err reading body from response: {e}"));
            warn!("Slack webhook failed: {} - {}", status, body);
            return Err(DeliveryError::Rejected { status, body });
        }

        debug!("Slack notification sent");
        Ok(())
    }
}
