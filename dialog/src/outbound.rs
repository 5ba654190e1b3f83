//! Replies produced by the dialog engine, independent of any transport.

use relay_core::Button;

/// Poll to be created in a group chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    pub target_chat_id: i64,
    pub question: String,
    pub answers: Vec<String>,
}

/// One delivery. `Text` and `Image` go to the chat the event came from; `Poll` goes to its target.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text { text: String, buttons: Vec<Button> },
    Image(Vec<u8>),
    Poll(PollRequest),
}

impl Outbound {
    pub fn text(text: impl Into<String>) -> Self {
        Outbound::Text {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn choices(text: impl Into<String>, buttons: Vec<Button>) -> Self {
        Outbound::Text {
            text: text.into(),
            buttons,
        }
    }

    /// Text of a `Text` reply, for logs and tests.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Outbound::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
