//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends through Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{Bot as CoreBot, Button, Chat, RelayError, Result};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputPollOption};

/// Thin wrapper around teloxide::Bot that implements relay-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn bot_error(e: teloxide::RequestError) -> RelayError {
    RelayError::Bot(e.to_string())
}

/// One button per row, in order.
fn keyboard(buttons: &[Button]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        buttons
            .iter()
            .map(|b| vec![InlineKeyboardButton::callback(b.label.clone(), b.value.clone())]),
    )
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_choices(&self, chat: &Chat, text: &str, buttons: &[Button]) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard(buttons))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_image(&self, chat: &Chat, image: Vec<u8>) -> Result<()> {
        // Giphy serves GIFs; an animation keeps them moving.
        self.bot
            .send_animation(ChatId(chat.id), InputFile::memory(image).file_name("image.gif"))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_poll(&self, chat_id: i64, question: &str, answers: &[String]) -> Result<()> {
        self.bot
            .send_poll(
                ChatId(chat_id),
                question.to_string(),
                answers.iter().map(|a| InputPollOption::new(a.clone())),
            )
            .await
            .map_err(bot_error)?;
        Ok(())
    }
}
