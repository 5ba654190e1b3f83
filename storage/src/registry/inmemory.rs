//! In-memory group registry for single-instance deployments and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::GroupRegistry;
use crate::error::StorageError;
use crate::models::GroupChatEntry;

#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupRegistry {
    chats: Arc<RwLock<HashMap<i64, String>>>,
}

impl InMemoryGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRegistry for InMemoryGroupRegistry {
    async fn upsert(&self, entry: GroupChatEntry) -> Result<(), StorageError> {
        self.chats.write().await.insert(entry.chat_id, entry.title);
        Ok(())
    }

    async fn remove(&self, chat_id: i64) -> Result<bool, StorageError> {
        Ok(self.chats.write().await.remove(&chat_id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<GroupChatEntry>, StorageError> {
        let mut entries: Vec<GroupChatEntry> = self
            .chats
            .read()
            .await
            .iter()
            .map(|(id, title)| GroupChatEntry::new(*id, title.clone()))
            .collect();
        entries.sort_by(|a, b| a.title.cmp(&b.title).then(a.chat_id.cmp(&b.chat_id)));
        Ok(entries)
    }

    async fn contains(&self, chat_id: i64) -> Result<bool, StorageError> {
        Ok(self.chats.read().await.contains_key(&chat_id))
    }
}
