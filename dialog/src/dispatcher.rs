//! Dispatcher: entry point of the dialog layer.
//!
//! For every inbound event it resolves the session, routes by the session's current step and
//! the event's command or payload, and commits the engine's transition with
//! [`SessionStore::compare_and_set`]. A lost race means another event for the same session
//! already moved it on; the losing event is dropped with no reply.

use std::sync::Arc;

use relay_core::Event;
use storage::{SessionKey, SessionStore, StorageError};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::command::Command;
use crate::engine::{Engine, Input, Start, Transition};
use crate::outbound::Outbound;
use crate::texts;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// What an event asks for, before looking at the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inbound<'a> {
    Command(Command),
    Input(Input<'a>),
}

impl<'a> Inbound<'a> {
    /// Membership updates and messages without text carry nothing for the dialogs.
    fn from_event(event: &'a Event) -> Option<Self> {
        match event {
            Event::Message(message) => {
                let text = message.text.as_deref()?;
                Some(match Command::parse(text) {
                    Some(command) => Inbound::Command(command),
                    None => Inbound::Input(Input::Text(text)),
                })
            }
            Event::Callback(callback) => callback
                .data
                .as_deref()
                .map(|data| Inbound::Input(Input::Choice(data))),
            Event::Membership(_) => None,
        }
    }
}

pub struct Dispatcher {
    sessions: Arc<dyn SessionStore>,
    engine: Engine,
}

impl Dispatcher {
    pub fn new(sessions: Arc<dyn SessionStore>, engine: Engine) -> Self {
        Self { sessions, engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the replies to deliver for `event`, in order. Empty means the event was dropped
    /// (noise for the current step, cancel while idle, or a lost concurrent update).
    #[instrument(
        skip(self, event),
        fields(kind = event.kind(), user_id = event.user().id, chat_id = event.chat().id)
    )]
    pub async fn dispatch(&self, event: &Event) -> Result<Vec<Outbound>, DispatchError> {
        let Some(inbound) = Inbound::from_event(event) else {
            return Ok(Vec::new());
        };

        match inbound {
            Inbound::Command(Command::Start) => {
                return Ok(vec![
                    Outbound::text(texts::WELCOME),
                    Outbound::text(texts::MENU),
                ])
            }
            Inbound::Command(Command::Help) => return Ok(vec![Outbound::text(texts::MENU)]),
            _ => {}
        }

        let key = SessionKey::new(event.chat().id, event.user().id);
        let session = self.sessions.load(&key).await?;
        debug!(
            session = %key,
            flow = %session.dialog.flow(),
            step = session.dialog.step().unwrap_or("-"),
            version = session.version,
            "Session loaded"
        );

        match inbound {
            Inbound::Command(Command::Cancel) => {
                if session.dialog.is_idle() {
                    return Ok(Vec::new());
                }
                info!(flow = %session.dialog.flow(), "Dialog cancelled");
                self.commit(
                    &key,
                    session.version,
                    Transition::reset(vec![Outbound::text(texts::MENU)]),
                )
                .await
            }
            Inbound::Command(command) => {
                if !session.dialog.is_idle() {
                    debug!(command = command.name(), "Start refused; another dialog is active");
                    return Ok(vec![Outbound::text(texts::DIALOG_IN_PROGRESS)]);
                }
                match self.engine.start(command).await? {
                    Some(Start::Enter(transition)) => {
                        info!(flow = %transition.next.flow(), "Dialog started");
                        self.commit(&key, session.version, transition).await
                    }
                    Some(Start::Reply(replies)) => Ok(replies),
                    None => Ok(Vec::new()),
                }
            }
            Inbound::Input(input) => match self.engine.step(&session.dialog, input).await? {
                Some(transition) => self.commit(&key, session.version, transition).await,
                None => {
                    debug!(?input, "No step accepts this input; dropped");
                    Ok(Vec::new())
                }
            },
        }
    }

    async fn commit(
        &self,
        key: &SessionKey,
        version: u64,
        transition: Transition,
    ) -> Result<Vec<Outbound>, DispatchError> {
        match self
            .sessions
            .compare_and_set(key, version, &transition.next)
            .await
        {
            Ok(new_version) => {
                debug!(
                    session = %key,
                    flow = %transition.next.flow(),
                    step = transition.next.step().unwrap_or("-"),
                    version = new_version,
                    "Session committed"
                );
                Ok(transition.replies)
            }
            Err(e) if e.is_conflict() => {
                debug!(session = %key, version, "Session changed concurrently; event dropped");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}
