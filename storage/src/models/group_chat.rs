use serde::{Deserialize, Serialize};

/// A group chat the bot is currently a member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupChatEntry {
    pub chat_id: i64,
    pub title: String,
}

impl GroupChatEntry {
    pub fn new(chat_id: i64, title: impl Into<String>) -> Self {
        Self {
            chat_id,
            title: title.into(),
        }
    }
}
