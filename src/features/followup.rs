//! Followup messages
//!
//! Posts an extra message against an interaction token after the initial
//! response has gone out. Sends are fire-and-forget: the caller never waits
//! and failures are only logged.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::{debug, warn};

use crate::interactions::ReplyData;

pub trait FollowupSender: Send + Sync {
    /// Queue a followup for the interaction identified by `token`
    fn send(&self, token: &str, data: ReplyData);
}

/// Posts followups to the Discord webhook endpoint
#[derive(Clone)]
pub struct WebhookFollowups {
    client: reqwest::Client,
    api_url: String,
    application_id: String,
}

impl WebhookFollowups {
    pub fn new(api_url: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            application_id: application_id.into(),
        }
    }

    pub fn webhook_url(&self, token: &str) -> String {
        format!("{}/webhooks/{}/{}", self.api_url, self.application_id, token)
    }
}

impl FollowupSender for WebhookFollowups {
    fn send(&self, token: &str, data: ReplyData) {
        let client = self.client.clone();
        let url = self.webhook_url(token);
        let body = data.to_json();

        tokio::spawn(async move {
            match client.post(&url).json(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Followup delivered");
                }
                Ok(response) => warn!("Followup rejected with HTTP {}", response.status()),
                Err(e) => warn!("Followup request failed: {e}"),
            }
        });
    }
}
