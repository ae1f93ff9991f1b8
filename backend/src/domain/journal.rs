//! Journal service enforcing ownership above the entry store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::account::map_entry_persistence_error;
use crate::domain::ports::{EntryRepository, JournalService};
use crate::domain::{Entry, EntryDraft, EntryId, Error, UserId};

/// Default [`JournalService`] implementation over the entry store.
///
/// Timestamps come from the injected clock so tests can pin or advance time;
/// the store itself applies no defaults.
#[derive(Clone)]
pub struct DefaultJournalService {
    entries: Arc<dyn EntryRepository>,
    clock: Arc<dyn Clock>,
}

impl DefaultJournalService {
    /// Create a new journal service from the entry store and a clock.
    pub fn new(entries: Arc<dyn EntryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { entries, clock }
    }

    /// Load an entry and verify the acting owner before any read or mutation.
    ///
    /// Missing entries map to not-found; foreign entries map to forbidden
    /// with an action-specific message, deliberately distinguishing the two
    /// cases exactly as the route contract requires.
    async fn load_owned(&self, owner: UserId, id: EntryId, action: &str) -> Result<Entry, Error> {
        let entry = self
            .entries
            .find_by_id(id)
            .await
            .map_err(map_entry_persistence_error)?
            .ok_or_else(|| Error::not_found("Entry not found."))?;

        if entry.user_id() != Some(owner) {
            return Err(Error::forbidden(format!(
                "You don't have permission to {action} this entry."
            )));
        }
        Ok(entry)
    }
}

#[async_trait]
impl JournalService for DefaultJournalService {
    async fn list_entries(&self, owner: UserId) -> Result<Vec<Entry>, Error> {
        self.entries
            .list_by_owner(owner)
            .await
            .map_err(map_entry_persistence_error)
    }

    async fn create_entry(&self, owner: UserId, draft: EntryDraft) -> Result<Entry, Error> {
        let now = self.clock.utc();
        self.entries
            .insert(owner, &draft, now)
            .await
            .map_err(map_entry_persistence_error)
    }

    async fn view_entry(&self, owner: UserId, id: EntryId) -> Result<Entry, Error> {
        self.load_owned(owner, id, "view").await
    }

    async fn edit_entry(
        &self,
        owner: UserId,
        id: EntryId,
        draft: EntryDraft,
    ) -> Result<Entry, Error> {
        let _ = self.load_owned(owner, id, "edit").await?;
        let now = self.clock.utc();
        self.entries
            .update(id, &draft, now)
            .await
            .map_err(map_entry_persistence_error)
    }

    async fn delete_entry(&self, owner: UserId, id: EntryId) -> Result<(), Error> {
        let _ = self.load_owned(owner, id, "delete").await?;
        self.entries
            .delete(id)
            .await
            .map_err(map_entry_persistence_error)
    }
}
