//! Session store: keyed, versioned storage of per-user dialog state.
//!
//! Read-modify-write goes through [`SessionStore::compare_and_set`]: a caller reads a session at
//! version *v*, computes the next dialog without holding anything, and writes it back only if the
//! stored version is still *v*. A lost race is reported as [`StorageError::VersionConflict`].

mod inmemory;
mod sqlite;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{Dialog, Session, SessionKey};

pub use inmemory::InMemorySessionStore;
pub use sqlite::SqliteSessionStore;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or an idle session at version 0 if `key` was never written.
    async fn load(&self, key: &SessionKey) -> Result<Session, StorageError>;

    /// Stores `dialog` for `key` if the stored version equals `expected_version` (0 = never
    /// written). Returns the new version, which is `expected_version + 1`.
    async fn compare_and_set(
        &self,
        key: &SessionKey,
        expected_version: u64,
        dialog: &Dialog,
    ) -> Result<u64, StorageError>;
}
