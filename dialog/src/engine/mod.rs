//! Dialog engine: pure-ish transitions from (current dialog, input) to (next dialog, replies).
//!
//! The engine never touches the session store. It may call provider adapters and read the group
//! registry; the [`crate::Dispatcher`] decides whether the resulting [`Transition`] is committed.

mod currency;
mod image;
mod poll;
mod weather;

use std::sync::Arc;

use providers::{CurrencyService, ImageService, WeatherService};
use storage::{CurrencyStep, Dialog, GroupRegistry, PollStep, StorageError, WeatherStep};

use crate::command::Command;
use crate::config::DialogConfig;
use crate::outbound::Outbound;

/// Input for the current step: typed text or the value of a pressed choice button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Text(&'a str),
    Choice(&'a str),
}

/// Next dialog plus the replies to deliver once it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: Dialog,
    pub replies: Vec<Outbound>,
}

impl Transition {
    pub fn to(next: Dialog, replies: Vec<Outbound>) -> Self {
        Self { next, replies }
    }

    /// Ends the dialog.
    pub fn reset(replies: Vec<Outbound>) -> Self {
        Self::to(Dialog::Idle, replies)
    }
}

/// Outcome of a start command accepted while idle.
#[derive(Debug, Clone, PartialEq)]
pub enum Start {
    /// A dialog begins; the transition must be committed.
    Enter(Transition),
    /// Replies only; the session stays idle and is not written.
    Reply(Vec<Outbound>),
}

/// Holds the collaborators the flows need. Cheap to share: everything is behind `Arc`.
#[derive(Clone)]
pub struct Engine {
    weather: Arc<dyn WeatherService>,
    currency: Arc<dyn CurrencyService>,
    images: Arc<dyn ImageService>,
    registry: Arc<dyn GroupRegistry>,
    config: DialogConfig,
}

impl Engine {
    pub fn new(
        weather: Arc<dyn WeatherService>,
        currency: Arc<dyn CurrencyService>,
        images: Arc<dyn ImageService>,
        registry: Arc<dyn GroupRegistry>,
        config: DialogConfig,
    ) -> Self {
        Self {
            weather,
            currency,
            images,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Begins the flow of `command`. Returns `None` for commands that do not start anything.
    pub async fn start(&self, command: Command) -> Result<Option<Start>, StorageError> {
        let start = match command {
            Command::Weather => Start::Enter(weather::start()),
            Command::Currencies => Start::Enter(currency::start()),
            Command::Poll => poll::start(self.registry.as_ref(), &self.config).await?,
            Command::Funny => {
                Start::Reply(image::funny(self.images.as_ref(), &self.config.image_tag).await)
            }
            Command::Start | Command::Help | Command::Cancel => return Ok(None),
        };
        Ok(Some(start))
    }

    /// Runs the step `dialog` is waiting in. `None` means no step accepts this input.
    pub async fn step(
        &self,
        dialog: &Dialog,
        input: Input<'_>,
    ) -> Result<Option<Transition>, StorageError> {
        let transition = match (dialog, input) {
            (Dialog::Weather(WeatherStep::AwaitLocality { last_locality }), Input::Text(text)) => {
                weather::on_locality(self.weather.as_ref(), last_locality, text).await
            }
            (Dialog::Currency(CurrencyStep::AwaitFrom), Input::Text(text)) => {
                currency::on_from(text)
            }
            (Dialog::Currency(CurrencyStep::AwaitTo { from }), Input::Text(text)) => {
                currency::on_to(from, text)
            }
            (Dialog::Currency(CurrencyStep::AwaitAmount { from, to }), Input::Text(text)) => {
                currency::on_amount(self.currency.as_ref(), from, to, text).await
            }
            (Dialog::Poll(PollStep::AwaitGroupChat), Input::Choice(value)) => {
                poll::on_group_chat(self.registry.as_ref(), &self.config, value).await?
            }
            (Dialog::Poll(PollStep::AwaitQuestion { chat_id }), Input::Text(text)) => {
                poll::on_question(*chat_id, text)
            }
            (
                Dialog::Poll(PollStep::AwaitAnswer {
                    chat_id,
                    question,
                    answers,
                }),
                input,
            ) => {
                let draft = poll::Draft {
                    chat_id: *chat_id,
                    question,
                    answers,
                };
                match input {
                    Input::Text(text) => poll::on_answer(&self.config, draft, text),
                    Input::Choice(value) if value == self.config.poll_finish_choice => {
                        poll::on_finish(&self.config, draft)
                    }
                    Input::Choice(_) => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(transition))
    }
}
