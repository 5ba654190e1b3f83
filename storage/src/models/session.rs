//! Session model: one record per (chat, user) holding the active dialog and its version.
//!
//! Each flow carries its own step enum, and each step holds exactly the fields produced by the
//! steps before it. A step can therefore never read a field that has not been written yet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the owner of a dialog: a user inside a particular chat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(chat_id: i64, user_id: i64) -> Self {
        Self(format!("{}:{}", chat_id, user_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flow tag of a dialog; `None` means no active dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    None,
    Weather,
    Currency,
    Poll,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::None => "none",
            Flow::Weather => "weather",
            Flow::Currency => "currency",
            Flow::Poll => "poll",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherStep {
    /// Repeatable: after a lookup the dialog stays here with the last locality asked for.
    AwaitLocality { last_locality: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyStep {
    AwaitFrom,
    AwaitTo { from: String },
    AwaitAmount { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStep {
    AwaitGroupChat,
    AwaitQuestion {
        chat_id: i64,
    },
    AwaitAnswer {
        chat_id: i64,
        question: String,
        answers: Vec<String>,
    },
}

/// Active dialog of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialog {
    #[default]
    Idle,
    Weather(WeatherStep),
    Currency(CurrencyStep),
    Poll(PollStep),
}

impl Dialog {
    pub fn flow(&self) -> Flow {
        match self {
            Dialog::Idle => Flow::None,
            Dialog::Weather(_) => Flow::Weather,
            Dialog::Currency(_) => Flow::Currency,
            Dialog::Poll(_) => Flow::Poll,
        }
    }

    /// Step name for logs and the persisted `step` column; `None` when idle.
    pub fn step(&self) -> Option<&'static str> {
        let name = match self {
            Dialog::Idle => return None,
            Dialog::Weather(WeatherStep::AwaitLocality { .. }) => "await_locality",
            Dialog::Currency(CurrencyStep::AwaitFrom) => "await_from",
            Dialog::Currency(CurrencyStep::AwaitTo { .. }) => "await_to",
            Dialog::Currency(CurrencyStep::AwaitAmount { .. }) => "await_amount",
            Dialog::Poll(PollStep::AwaitGroupChat) => "await_group_chat",
            Dialog::Poll(PollStep::AwaitQuestion { .. }) => "await_question",
            Dialog::Poll(PollStep::AwaitAnswer { .. }) => "await_answer",
        };
        Some(name)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Dialog::Idle)
    }
}

/// Stored session. `version` is 0 for a session that has never been written and grows by one
/// with every successful conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub key: SessionKey,
    pub dialog: Dialog,
    pub version: u64,
}

impl Session {
    /// Fresh idle session, as created lazily on first contact.
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            dialog: Dialog::Idle,
            version: 0,
        }
    }
}
