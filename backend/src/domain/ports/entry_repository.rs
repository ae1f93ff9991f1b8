//! Port abstraction for entry persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Entry, EntryDraft, EntryId, UserId};

/// Persistence errors raised by entry repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryPersistenceError {
    /// Repository connection could not be established.
    #[error("entry repository connection failed: {message}")]
    Connection {
        /// Adapter-reported failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("entry repository query failed: {message}")]
    Query {
        /// Adapter-reported failure description.
        message: String,
    },
    /// A mutation targeted a row that no longer exists.
    #[error("entry {id} no longer exists")]
    RowMissing {
        /// Identifier of the missing row.
        id: i64,
    },
}

impl EntryPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a missing-row error for the given identifier.
    pub const fn row_missing(id: i64) -> Self {
        Self::RowMissing { id }
    }
}

/// Driven port for the entry store.
///
/// Ownership enforcement is deliberately absent here; the journal service
/// compares owners before invoking any mutation.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Persist a new entry with `created_at = updated_at = now`.
    async fn insert(
        &self,
        owner: UserId,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<Entry, EntryPersistenceError>;

    /// Fetch an entry by identifier.
    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryPersistenceError>;

    /// List an owner's entries, `created_at` descending, ties broken by id
    /// descending so the newest insert wins among equal timestamps.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Entry>, EntryPersistenceError>;

    /// Overwrite the mutable fields and refresh `updated_at`.
    ///
    /// `created_at` and `user_id` are never touched.
    async fn update(
        &self,
        id: EntryId,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<Entry, EntryPersistenceError>;

    /// Delete an entry by identifier.
    async fn delete(&self, id: EntryId) -> Result<(), EntryPersistenceError>;

    /// Count the entries owned by a user.
    async fn count_by_owner(&self, owner: UserId) -> Result<u64, EntryPersistenceError>;
}
