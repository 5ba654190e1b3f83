//! # relay-bot
//!
//! Application crate: configuration from the environment, component assembly and the runner
//! that connects the handler chain to Telegram.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, create_stores, BotComponents};
pub use config::{BaseConfig, BotConfig, ServicesConfig};
pub use runner::{build_only, run_bot};
