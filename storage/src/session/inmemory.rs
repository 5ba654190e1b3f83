//! In-memory session store for single-instance deployments and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::SessionStore;
use crate::error::StorageError;
use crate::models::{Dialog, Session, SessionKey};

type SessionMap = HashMap<SessionKey, (Dialog, u64)>;

/// Sessions kept in a map; the write lock is held only for the compare-and-set itself.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<SessionMap>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Session, StorageError> {
        let sessions = self.sessions.read().await;
        let session = match sessions.get(key) {
            Some((dialog, version)) => Session {
                key: key.clone(),
                dialog: dialog.clone(),
                version: *version,
            },
            None => Session::new(key.clone()),
        };
        Ok(session)
    }

    async fn compare_and_set(
        &self,
        key: &SessionKey,
        expected_version: u64,
        dialog: &Dialog,
    ) -> Result<u64, StorageError> {
        let mut sessions = self.sessions.write().await;
        let current = sessions.get(key).map(|(_, v)| *v).unwrap_or(0);
        if current != expected_version {
            debug!(key = %key, expected_version, current, "Session version conflict");
            return Err(StorageError::VersionConflict {
                key: key.to_string(),
                expected: expected_version,
            });
        }
        let next = expected_version + 1;
        sessions.insert(key.clone(), (dialog.clone(), next));
        Ok(next)
    }
}
