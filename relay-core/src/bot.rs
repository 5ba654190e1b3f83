//! Bot abstraction for delivering replies.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it on top of teloxide and tests
//! substitute recording fakes.

use crate::error::Result;
use crate::types::{Button, Chat};
use async_trait::async_trait;

/// Outbound side of the transport. Every method is one delivery; failures surface as [`crate::RelayError::Bot`].
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a text message with one inline choice button per entry (label shown, value returned as callback payload).
    async fn send_choices(&self, chat: &Chat, text: &str, buttons: &[Button]) -> Result<()>;

    /// Sends raw image bytes as a photo.
    async fn send_image(&self, chat: &Chat, image: Vec<u8>) -> Result<()>;

    /// Sends a regular poll to `chat_id`.
    async fn send_poll(&self, chat_id: i64, question: &str, answers: &[String]) -> Result<()>;
}
