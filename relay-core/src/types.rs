//! Core types: user, chat, inbound events, choice buttons, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat identity. `chat_type` is one of `private`, `group`, `supergroup`, `channel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// True only for basic group chats; supergroups and channels are not groups here.
    pub fn is_group(&self) -> bool {
        self.chat_type == "group"
    }
}

/// A text (or non-text) message sent by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// `None` for stickers, photos and other non-text content.
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A press on an inline choice button; `data` is the opaque value attached to the button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Callback {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub data: Option<String>,
}

/// The bot's own membership status in a chat after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

/// Change of the bot's own membership in a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipUpdate {
    pub chat: Chat,
    pub title: Option<String>,
    /// Who made the change (the user adding or removing the bot).
    pub actor: User,
    pub new_status: MemberStatus,
}

/// Inbound update handed to the handler chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Message(Message),
    Callback(Callback),
    Membership(MembershipUpdate),
}

impl Event {
    pub fn user(&self) -> &User {
        match self {
            Event::Message(m) => &m.user,
            Event::Callback(c) => &c.user,
            Event::Membership(u) => &u.actor,
        }
    }

    pub fn chat(&self) -> &Chat {
        match self {
            Event::Message(m) => &m.chat,
            Event::Callback(c) => &c.chat,
            Event::Membership(u) => &u.chat,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message(_) => "message",
            Event::Callback(_) => "callback",
            Event::Membership(_) => "membership",
        }
    }
}

/// Inline choice button: `label` is shown, `value` comes back as [`Callback::data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub value: String,
}

impl Button {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Handler result for the chain. `Reply(text)` carries what was sent so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing was sent.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the delivered reply text.
    Reply(String),
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _event: &Event) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the event. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _event: &Event) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(&self, _event: &Event, _response: &HandlerResponse) -> crate::error::Result<()> {
        Ok(())
    }
}
