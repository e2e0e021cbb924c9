use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::TelegramConfig;
use crate::error::Result;

use super::{Notifier, SendError};

/// Sends messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    send_url: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            send_url: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                config.token
            ),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> std::result::Result<(), SendError> {
        let request = SendMessageRequest { chat_id, text };

        let response = self
            .client
            .post(&self.send_url)
            .json(&request)
            .send()
            .await
            // The URL embeds the bot token; keep it out of error text
            .map_err(|e| SendError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SendError::Status(status));
        }

        let body = response
            .json::<SendMessageResponse>()
            .await
            .map_err(|e| SendError::Request(e.without_url().to_string()))?;

        if body.ok {
            Ok(())
        } else {
            Err(SendError::Rejected(
                body.description.unwrap_or_else(|| "no description".to_string()),
            ))
        }
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}
