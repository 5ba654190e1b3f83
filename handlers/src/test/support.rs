//! Shared fixtures: sample events and a recording Bot.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use relay_core::{
    Bot, Button, Callback, Chat, Event, MemberStatus, MembershipUpdate, Message, RelayError,
    Result, User,
};

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some("testuser".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn chat(id: i64, chat_type: &str) -> Chat {
    Chat {
        id,
        chat_type: chat_type.to_string(),
    }
}

pub fn text_event(content: &str) -> Event {
    Event::Message(Message {
        id: "msg-1".to_string(),
        user: user(1),
        chat: chat(123, "private"),
        text: Some(content.to_string()),
        created_at: Utc::now(),
    })
}

pub fn callback_event(data: &str) -> Event {
    Event::Callback(Callback {
        id: "cb-1".to_string(),
        user: user(1),
        chat: chat(123, "private"),
        data: Some(data.to_string()),
    })
}

pub fn membership_event(chat_id: i64, chat_type: &str, title: &str, status: MemberStatus) -> Event {
    Event::Membership(MembershipUpdate {
        chat: chat(chat_id, chat_type),
        title: Some(title.to_string()),
        actor: user(1),
        new_status: status,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text(i64, String),
    Choices(i64, String, Vec<Button>),
    Image(i64, usize),
    Poll(i64, String, Vec<String>),
}

/// Records every delivery; optionally fails poll submissions.
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_polls: bool,
}

impl RecordingBot {
    pub fn failing_polls() -> Self {
        Self {
            fail_polls: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Sent::Text(chat.id, text.to_string()));
        Ok(())
    }

    async fn send_choices(&self, chat: &Chat, text: &str, buttons: &[Button]) -> Result<()> {
        self.record(Sent::Choices(chat.id, text.to_string(), buttons.to_vec()));
        Ok(())
    }

    async fn send_image(&self, chat: &Chat, image: Vec<u8>) -> Result<()> {
        self.record(Sent::Image(chat.id, image.len()));
        Ok(())
    }

    async fn send_poll(&self, chat_id: i64, question: &str, answers: &[String]) -> Result<()> {
        if self.fail_polls {
            return Err(RelayError::Bot("Bad Request: chat not found".to_string()));
        }
        self.record(Sent::Poll(chat_id, question.to_string(), answers.to_vec()));
        Ok(())
    }
}
