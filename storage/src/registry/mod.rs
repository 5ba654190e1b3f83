//! Group registry: the group chats the bot currently belongs to, keyed by chat id.
//!
//! Written only by membership events (last write wins per chat id) and read as a point-in-time
//! snapshot when a poll dialog starts.

mod inmemory;
mod sqlite;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::GroupChatEntry;

pub use inmemory::InMemoryGroupRegistry;
pub use sqlite::SqliteGroupRegistry;

#[async_trait]
pub trait GroupRegistry: Send + Sync {
    /// Inserts the chat or overwrites its title.
    async fn upsert(&self, entry: GroupChatEntry) -> Result<(), StorageError>;

    /// Removes the chat; returns whether it was registered.
    async fn remove(&self, chat_id: i64) -> Result<bool, StorageError>;

    /// All registered chats ordered by title, then chat id.
    async fn list_all(&self) -> Result<Vec<GroupChatEntry>, StorageError>;

    async fn contains(&self, chat_id: i64) -> Result<bool, StorageError> {
        Ok(self.list_all().await?.iter().any(|e| e.chat_id == chat_id))
    }
}
