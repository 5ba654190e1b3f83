//! Runs the dialog dispatcher for message and callback events and delivers its replies.

use std::sync::Arc;

use async_trait::async_trait;
use dialog::{texts, Dispatcher, Outbound};
use relay_core::{Bot, Chat, Event, Handler, HandlerError, HandlerResponse, Result};
use tracing::{error, instrument, warn};

/// Last handler in the chain. Returns `Reply` with the delivered texts joined by newlines, or
/// `Stop` when the dispatcher produced nothing.
pub struct DialogHandler {
    dispatcher: Arc<Dispatcher>,
    bot: Arc<dyn Bot>,
}

impl DialogHandler {
    pub fn new(dispatcher: Arc<Dispatcher>, bot: Arc<dyn Bot>) -> Self {
        Self { dispatcher, bot }
    }

    /// Delivers replies in order. A failed poll submission is reported to the user as an
    /// unavailable service and ends the delivery; other send failures are returned.
    async fn deliver(&self, chat: &Chat, replies: Vec<Outbound>) -> Result<Vec<String>> {
        let mut sent = Vec::new();
        for reply in replies {
            match reply {
                Outbound::Text { text, buttons } if buttons.is_empty() => {
                    self.bot.send_message(chat, &text).await?;
                    sent.push(text);
                }
                Outbound::Text { text, buttons } => {
                    self.bot.send_choices(chat, &text, &buttons).await?;
                    sent.push(text);
                }
                Outbound::Image(bytes) => self.bot.send_image(chat, bytes).await?,
                Outbound::Poll(poll) => {
                    if let Err(e) = self
                        .bot
                        .send_poll(poll.target_chat_id, &poll.question, &poll.answers)
                        .await
                    {
                        warn!(
                            target_chat_id = poll.target_chat_id,
                            error = %e,
                            "Poll submission failed"
                        );
                        self.bot
                            .send_message(chat, texts::SERVICE_UNAVAILABLE)
                            .await?;
                        sent.push(texts::SERVICE_UNAVAILABLE.to_string());
                        break;
                    }
                }
            }
        }
        Ok(sent)
    }
}

#[async_trait]
impl Handler for DialogHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        if matches!(event, Event::Membership(_)) {
            return Ok(HandlerResponse::Continue);
        }

        let replies = self.dispatcher.dispatch(event).await.map_err(|e| {
            error!(error = %e, "Dispatch failed");
            HandlerError::Dispatch(e.to_string())
        })?;
        if replies.is_empty() {
            return Ok(HandlerResponse::Stop);
        }

        let sent = self.deliver(event.chat(), replies).await?;
        Ok(HandlerResponse::Reply(sent.join("\n")))
    }
}
