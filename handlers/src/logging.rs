//! Handler that logs every event; always continues.

use async_trait::async_trait;
use relay_core::{Event, Handler, HandlerResponse, Result};
use tracing::{debug, info, instrument};

/// Logs each event in before() and the response in after().
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &Event) -> Result<bool> {
        let user = event.user();
        let detail = match event {
            Event::Message(m) => m.text.as_deref().unwrap_or("<non-text>"),
            Event::Callback(c) => c.data.as_deref().unwrap_or("<no data>"),
            Event::Membership(_) => "",
        };
        info!(
            kind = event.kind(),
            user_id = user.id,
            username = %user.username.as_deref().unwrap_or("unknown"),
            chat_id = event.chat().id,
            detail = %detail,
            "Received event"
        );
        Ok(true)
    }

    #[instrument(skip(self, event, response))]
    async fn after(&self, event: &Event, response: &HandlerResponse) -> Result<()> {
        debug!(
            kind = event.kind(),
            user_id = event.user().id,
            response = ?response,
            "Processed event"
        );
        Ok(())
    }
}
