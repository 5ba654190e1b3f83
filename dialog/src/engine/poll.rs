//! Poll flow: target group chat, question, answers, then submission.

use relay_core::Button;
use storage::{Dialog, GroupChatEntry, GroupRegistry, PollStep, StorageError};
use tracing::{debug, info};

use super::{Start, Transition};
use crate::config::DialogConfig;
use crate::outbound::{Outbound, PollRequest};
use crate::texts;

/// Poll fields collected so far, borrowed from the stored step.
#[derive(Debug, Clone, Copy)]
pub(super) struct Draft<'a> {
    pub chat_id: i64,
    pub question: &'a str,
    pub answers: &'a [String],
}

impl Draft<'_> {
    fn with_answers(&self, answers: Vec<String>) -> Dialog {
        Dialog::Poll(PollStep::AwaitAnswer {
            chat_id: self.chat_id,
            question: self.question.to_string(),
            answers,
        })
    }

    fn unchanged(&self) -> Dialog {
        self.with_answers(self.answers.to_vec())
    }
}

fn chat_buttons(chats: &[GroupChatEntry], config: &DialogConfig) -> Vec<Button> {
    chats
        .iter()
        .map(|chat| Button::new(chat.title.clone(), chat.chat_id.to_string()))
        .chain(std::iter::once(Button::new(
            texts::POLL_NO_DESIRED_CHAT_BTN,
            config.poll_none_choice.clone(),
        )))
        .collect()
}

fn finish_button(config: &DialogConfig) -> Vec<Button> {
    vec![Button::new(
        texts::POLL_FINISH_BTN,
        config.poll_finish_choice.clone(),
    )]
}

/// Refuses to start while the registry is empty; otherwise offers one button per chat.
pub(super) async fn start(
    registry: &dyn GroupRegistry,
    config: &DialogConfig,
) -> Result<Start, StorageError> {
    let chats = registry.list_all().await?;
    if chats.is_empty() {
        return Ok(Start::Reply(vec![Outbound::text(texts::POLL_NO_GROUP_CHATS)]));
    }
    debug!(chats = chats.len(), "Offering group chats for a poll");
    Ok(Start::Enter(Transition::to(
        Dialog::Poll(PollStep::AwaitGroupChat),
        vec![Outbound::choices(
            texts::POLL_ASK_GROUP_CHAT,
            chat_buttons(&chats, config),
        )],
    )))
}

/// Accepts a registered chat id or the "none" sentinel; anything else re-offers the chats.
pub(super) async fn on_group_chat(
    registry: &dyn GroupRegistry,
    config: &DialogConfig,
    value: &str,
) -> Result<Transition, StorageError> {
    if value == config.poll_none_choice {
        return Ok(Transition::reset(vec![Outbound::text(
            texts::POLL_NO_DESIRED_CHAT,
        )]));
    }

    if let Ok(chat_id) = value.parse::<i64>() {
        if registry.contains(chat_id).await? {
            return Ok(Transition::to(
                Dialog::Poll(PollStep::AwaitQuestion { chat_id }),
                vec![Outbound::text(texts::POLL_ASK_QUESTION)],
            ));
        }
    }

    debug!(value, "Selected chat is not registered; asking again");
    let chats = registry.list_all().await?;
    Ok(Transition::to(
        Dialog::Poll(PollStep::AwaitGroupChat),
        vec![Outbound::choices(
            texts::POLL_ASK_GROUP_CHAT,
            chat_buttons(&chats, config),
        )],
    ))
}

pub(super) fn on_question(chat_id: i64, text: &str) -> Transition {
    Transition::to(
        Dialog::Poll(PollStep::AwaitAnswer {
            chat_id,
            question: text.trim().to_string(),
            answers: Vec::new(),
        }),
        vec![Outbound::text(texts::POLL_ASK_ANSWER)],
    )
}

/// Appends an answer. From the minimum on, the prompt carries the finish button.
pub(super) fn on_answer(config: &DialogConfig, draft: Draft<'_>, text: &str) -> Transition {
    if draft.answers.len() >= config.poll_max_answers {
        return Transition::to(
            draft.unchanged(),
            vec![Outbound::choices(
                texts::poll_too_many_answers(config.poll_max_answers),
                finish_button(config),
            )],
        );
    }

    let mut answers = draft.answers.to_vec();
    answers.push(text.trim().to_string());

    let prompt = if answers.len() < config.poll_min_answers {
        Outbound::text(texts::POLL_ASK_NEXT_ANSWER)
    } else {
        Outbound::choices(texts::POLL_ASK_NEXT_ANSWER_OR_FINISH, finish_button(config))
    };
    Transition::to(draft.with_answers(answers), vec![prompt])
}

/// Submits the poll once enough answers are collected.
pub(super) fn on_finish(config: &DialogConfig, draft: Draft<'_>) -> Transition {
    if draft.answers.len() < config.poll_min_answers {
        return Transition::to(
            draft.unchanged(),
            vec![Outbound::text(texts::POLL_ASK_NEXT_ANSWER)],
        );
    }

    info!(
        target_chat_id = draft.chat_id,
        answers = draft.answers.len(),
        "Poll ready for submission"
    );
    Transition::reset(vec![
        Outbound::Poll(PollRequest {
            target_chat_id: draft.chat_id,
            question: draft.question.to_string(),
            answers: draft.answers.to_vec(),
        }),
        Outbound::text(texts::POLL_READY),
    ])
}
