//! SQLite group registry.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use super::GroupRegistry;
use crate::error::StorageError;
use crate::models::GroupChatEntry;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteGroupRegistry {
    pool_manager: SqlitePoolManager,
}

impl SqliteGroupRegistry {
    /// Wraps the pool and creates the `group_chats` table if it does not exist.
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS group_chats (
                chat_id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool_manager.pool())
        .await?;

        info!("Group chats table ready");
        Ok(Self { pool_manager })
    }
}

#[async_trait]
impl GroupRegistry for SqliteGroupRegistry {
    async fn upsert(&self, entry: GroupChatEntry) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO group_chats (chat_id, title, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(chat_id) DO UPDATE SET
                title = excluded.title,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(entry.chat_id)
        .bind(&entry.title)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    async fn remove(&self, chat_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM group_chats WHERE chat_id = ?")
            .bind(chat_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<GroupChatEntry>, StorageError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT chat_id, title FROM group_chats ORDER BY title, chat_id")
                .fetch_all(self.pool_manager.pool())
                .await?;
        Ok(rows
            .into_iter()
            .map(|(chat_id, title)| GroupChatEntry { chat_id, title })
            .collect())
    }

    async fn contains(&self, chat_id: i64) -> Result<bool, StorageError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT chat_id FROM group_chats WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(row.is_some())
    }
}
