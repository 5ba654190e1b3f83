//! SQLite session store. The conditional write is a single statement, so it stays atomic across
//! processes sharing the database file.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use tracing::{debug, info};

use super::SessionStore;
use crate::error::StorageError;
use crate::models::{Dialog, Session, SessionKey};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteSessionStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteSessionStore {
    /// Wraps the pool and creates the `sessions` table if it does not exist.
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                session_key TEXT PRIMARY KEY,
                flow TEXT NOT NULL,
                step TEXT,
                fields TEXT NOT NULL,
                version INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        info!("Sessions table ready");
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Session, StorageError> {
        let row = sqlx::query("SELECT fields, version FROM sessions WHERE session_key = ?")
            .bind(key.as_str())
            .fetch_optional(self.pool_manager.pool())
            .await?;

        match row {
            Some(row) => {
                let fields: String = row.try_get("fields")?;
                let version: i64 = row.try_get("version")?;
                Ok(Session {
                    key: key.clone(),
                    dialog: serde_json::from_str(&fields)?,
                    version: version as u64,
                })
            }
            None => Ok(Session::new(key.clone())),
        }
    }

    async fn compare_and_set(
        &self,
        key: &SessionKey,
        expected_version: u64,
        dialog: &Dialog,
    ) -> Result<u64, StorageError> {
        let fields = serde_json::to_string(dialog)?;
        let next = expected_version + 1;
        let pool = self.pool_manager.pool();

        let result = if expected_version == 0 {
            sqlx::query(
                r#"
                INSERT INTO sessions (session_key, flow, step, fields, version, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT(session_key) DO NOTHING
                "#,
            )
            .bind(key.as_str())
            .bind(dialog.flow().as_str())
            .bind(dialog.step())
            .bind(&fields)
            .bind(next as i64)
            .bind(Utc::now())
            .execute(pool)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE sessions
                SET flow = ?, step = ?, fields = ?, version = ?, updated_at = ?
                WHERE session_key = ? AND version = ?
                "#,
            )
            .bind(dialog.flow().as_str())
            .bind(dialog.step())
            .bind(&fields)
            .bind(next as i64)
            .bind(Utc::now())
            .bind(key.as_str())
            .bind(expected_version as i64)
            .execute(pool)
            .await?
        };

        if result.rows_affected() == 0 {
            debug!(key = %key, expected_version, "Session version conflict");
            return Err(StorageError::VersionConflict {
                key: key.to_string(),
                expected: expected_version,
            });
        }
        Ok(next)
    }
}
