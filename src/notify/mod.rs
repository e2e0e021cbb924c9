pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

pub use telegram::TelegramNotifier;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("channel returned {0}")]
    Status(reqwest::StatusCode),

    #[error("channel rejected the message: {0}")]
    Rejected(String),
}

/// A channel that delivers plain-text messages to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver exactly one message.
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), SendError>;
}
