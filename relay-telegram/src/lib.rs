//! # relay-telegram
//!
//! Telegram layer: conversion of teloxide updates into [`relay_core::Event`]s, the
//! [`relay_core::Bot`] implementation, minimal config and the update dispatcher runner.
//! Handles only Telegram connectivity and handler-chain execution; no dialog logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{
    callback_event, member_status, membership_event, message_event, TelegramChatWrapper,
    TelegramUserWrapper,
};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::run_dispatcher;
