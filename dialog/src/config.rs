//! Dialog settings that the application loads from the environment.

use serde::{Deserialize, Serialize};

/// Tunables of the poll flow and the image command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Answers needed before a poll may be finished.
    pub poll_min_answers: usize,
    /// Answers a poll may hold at most (Telegram allows 10 options).
    pub poll_max_answers: usize,
    /// Callback value of the "none of these chats" button.
    pub poll_none_choice: String,
    /// Callback value of the "finish" button.
    pub poll_finish_choice: String,
    /// Tag passed to the image provider by `/funny`.
    pub image_tag: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            poll_min_answers: 2,
            poll_max_answers: 10,
            poll_none_choice: "none".to_string(),
            poll_finish_choice: "finish".to_string(),
            image_tag: "funny animals".to_string(),
        }
    }
}
