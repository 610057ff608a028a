//! Fire-and-forget status notifications.
//!
//! The sink never blocks the pipeline and its own failures never propagate;
//! a lost notification is logged and forgotten.

use async_trait::async_trait;
use tracing::{debug, warn};

/// Trait for posting status messages about pipeline runs.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Sink used when no webhook is configured.
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    async fn notify(&self, message: &str) {
        debug!(message, "notification sink disabled");
    }
}

/// Posts messages to a Slack incoming webhook.
pub struct SlackSink {
    webhook_url: String,
    username: String,
    channel: String,
    client: reqwest::Client,
}

impl SlackSink {
    pub fn new(webhook_url: String, username: String, channel: String) -> Self {
        Self {
            webhook_url,
            username,
            channel,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationSink for SlackSink {
    async fn notify(&self, message: &str) {
        let payload = serde_json::json!({
            "username": self.username,
            "icon_emoji": ":satellite_antenna:",
            "channel": self.channel,
            "attachments": [
                {
                    "color": "#9733EE",
                    "fields": [
                        {
                            "value": message,
                            "short": "false",
                        }
                    ]
                }
            ]
        });

        let result = self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .body(payload.to_string())
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "slack webhook rejected notification");
            }
            Ok(_) => {}
            Err(error) => {
                warn!(error = %error, "failed to send slack notification");
            }
        }
    }
}
