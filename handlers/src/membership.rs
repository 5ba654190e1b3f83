//! Keeps the group registry in step with the bot's own membership in group chats.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Event, Handler, HandlerError, HandlerResponse, MemberStatus, Result};
use storage::{GroupChatEntry, GroupRegistry};
use tracing::{debug, info, instrument};

/// Handles membership updates: leaving a group removes it, any other status upserts it with the
/// chat's current title. Non-group chats are ignored. Other events pass through.
pub struct MembershipHandler {
    registry: Arc<dyn GroupRegistry>,
}

impl MembershipHandler {
    pub fn new(registry: Arc<dyn GroupRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Handler for MembershipHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Event::Membership(update) = event else {
            return Ok(HandlerResponse::Continue);
        };
        if !update.chat.is_group() {
            debug!(
                chat_id = update.chat.id,
                chat_type = %update.chat.chat_type,
                "Membership change outside a group ignored"
            );
            return Ok(HandlerResponse::Stop);
        }

        let chat_id = update.chat.id;
        match update.new_status {
            MemberStatus::Left => {
                let removed = self
                    .registry
                    .remove(chat_id)
                    .await
                    .map_err(|e| HandlerError::Registry(e.to_string()))?;
                info!(chat_id, removed, "Bot left group chat");
            }
            status => {
                let title = update.title.clone().unwrap_or_default();
                self.registry
                    .upsert(GroupChatEntry::new(chat_id, title.clone()))
                    .await
                    .map_err(|e| HandlerError::Registry(e.to_string()))?;
                info!(chat_id, title = %title, status = ?status, "Group chat registered");
            }
        }
        Ok(HandlerResponse::Stop)
    }
}
