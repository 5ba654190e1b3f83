//! Storage crate: per-user dialog sessions and the registry of group chats the bot is in.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – Session, SessionKey, Dialog and its per-flow steps, GroupChatEntry
//! - [`session`] – SessionStore trait (versioned conditional writes), in-memory and SQLite stores
//! - [`registry`] – GroupRegistry trait, in-memory and SQLite registries
//! - [`sqlite_pool`] – SqlitePoolManager

pub mod error;
pub mod models;
pub mod registry;
pub mod session;
mod sqlite_pool;

pub use error::StorageError;
pub use models::{
    CurrencyStep, Dialog, Flow, GroupChatEntry, PollStep, Session, SessionKey, WeatherStep,
};
pub use registry::{GroupRegistry, InMemoryGroupRegistry, SqliteGroupRegistry};
pub use session::{InMemorySessionStore, SessionStore, SqliteSessionStore};
pub use sqlite_pool::SqlitePoolManager;
