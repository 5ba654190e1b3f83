//! Adapters from Telegram (teloxide) types to relay_core types.
//! Depends only on teloxide and relay_core type definitions.

use relay_core::{Callback, Chat, Event, MemberStatus, MembershipUpdate, Message, User};
use teloxide::types::{CallbackQuery, ChatMemberStatus, ChatMemberUpdated};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl TelegramUserWrapper<'_> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Chat for conversion to core [`Chat`].
pub struct TelegramChatWrapper<'a>(pub &'a teloxide::types::Chat);

impl TelegramChatWrapper<'_> {
    pub fn to_core(&self) -> Chat {
        let chat = self.0;
        let chat_type = if chat.is_private() {
            "private"
        } else if chat.is_group() {
            "group"
        } else if chat.is_supergroup() {
            "supergroup"
        } else {
            "channel"
        };
        Chat {
            id: chat.id.0,
            chat_type: chat_type.to_string(),
        }
    }
}

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Any message; `text` is `None` for non-text content.
pub fn message_event(msg: &teloxide::types::Message) -> Event {
    Event::Message(Message {
        id: msg.id.to_string(),
        user: msg
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_else(unknown_user),
        chat: TelegramChatWrapper(&msg.chat).to_core(),
        text: msg.text().map(str::to_string),
        created_at: msg.date,
    })
}

/// Button press. Without an accessible message the chat falls back to the user's private chat.
pub fn callback_event(q: &CallbackQuery) -> Event {
    let user = TelegramUserWrapper(&q.from).to_core();
    let chat = q
        .message
        .as_ref()
        .map(|m| TelegramChatWrapper(m.chat()).to_core())
        .unwrap_or_else(|| Chat {
            id: user.id,
            chat_type: "private".to_string(),
        });
    Event::Callback(Callback {
        id: q.id.to_string(),
        user,
        chat,
        data: q.data.clone(),
    })
}

/// Change of the bot's own membership (`my_chat_member` update).
pub fn membership_event(update: &ChatMemberUpdated) -> Event {
    Event::Membership(MembershipUpdate {
        chat: TelegramChatWrapper(&update.chat).to_core(),
        title: update.chat.title().map(str::to_string),
        actor: TelegramUserWrapper(&update.from).to_core(),
        new_status: member_status(update.new_chat_member.status()),
    })
}

pub fn member_status(status: ChatMemberStatus) -> MemberStatus {
    match status {
        ChatMemberStatus::Owner => MemberStatus::Owner,
        ChatMemberStatus::Administrator => MemberStatus::Administrator,
        ChatMemberStatus::Member => MemberStatus::Member,
        ChatMemberStatus::Restricted => MemberStatus::Restricted,
        ChatMemberStatus::Left => MemberStatus::Left,
        ChatMemberStatus::Banned => MemberStatus::Banned,
    }
}
