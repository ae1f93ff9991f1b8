//! Driving port for journal entry use-cases.
//!
//! Every entry-scoped operation takes the acting owner's id; the service is
//! responsible for the ownership comparison before any read or mutation
//! reaches the entry store.

use async_trait::async_trait;

use crate::domain::{Entry, EntryDraft, EntryId, Error, UserId};

/// Domain use-case port for journal entries.
#[async_trait]
pub trait JournalService: Send + Sync {
    /// List the owner's entries, newest first.
    async fn list_entries(&self, owner: UserId) -> Result<Vec<Entry>, Error>;

    /// Create a new entry owned by `owner`.
    async fn create_entry(&self, owner: UserId, draft: EntryDraft) -> Result<Entry, Error>;

    /// Ownership-checked read of a single entry.
    ///
    /// A missing entry yields not-found; an entry owned by another user
    /// yields forbidden. The distinction mirrors the route contract.
    async fn view_entry(&self, owner: UserId, id: EntryId) -> Result<Entry, Error>;

    /// Ownership-checked update of title, content, and tags.
    async fn edit_entry(
        &self,
        owner: UserId,
        id: EntryId,
        draft: EntryDraft,
    ) -> Result<Entry, Error>;

    /// Ownership-checked deletion.
    async fn delete_entry(&self, owner: UserId, id: EntryId) -> Result<(), Error>;
}
