//! # relay-core
//!
//! Core types and traits for the relay bot: inbound [`Event`]s, the [`Bot`] delivery trait,
//! the [`Handler`] trait run by handler-chain, errors, and tracing initialization.
//! Transport-agnostic; relay-telegram converts teloxide updates into these types.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Button, Callback, Chat, Event, Handler, HandlerResponse, MemberStatus, MembershipUpdate,
    Message, User,
};
