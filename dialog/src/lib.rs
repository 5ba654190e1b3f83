//! # dialog
//!
//! The conversation state machine. Each (chat, user) pair has at most one active dialog, kept in
//! the [`storage::SessionStore`]; the [`Dispatcher`] reads it, lets the engine compute the next
//! dialog and the replies, and commits through a conditional write so that two events racing on
//! the same session can never both advance it.
//!
//! - [`command`] – Slash commands and their menu descriptions
//! - [`config`] – [`DialogConfig`]: poll limits, sentinels, image tag
//! - [`engine`] – Per-flow transitions (weather, currency, poll) and the one-shot image command
//! - [`dispatcher`] – Routing by (dialog step, event) and optimistic commit
//! - [`outbound`] – What the transport should deliver
//! - [`texts`] – User-facing strings

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod outbound;
pub mod texts;

pub use command::Command;
pub use config::DialogConfig;
pub use dispatcher::{DispatchError, Dispatcher};
pub use outbound::{Outbound, PollRequest};
