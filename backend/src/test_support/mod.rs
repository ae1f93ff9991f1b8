//! In-memory adapters and a controllable clock for tests.
//!
//! These doubles implement the driven ports with plain mutex-guarded state so
//! unit and endpoint tests can exercise the services without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    EntryPersistenceError, EntryRepository, PasswordHashError, PasswordHasher, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Entry, EntryDraft, EntryId, User, UserId, Username};

/// Clock pinned to a chosen instant, advanced explicitly by tests.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Pin the clock to the given instant.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Local.from_utc_datetime(&self.utc().naive_utc())
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Password hasher double using a reversible marker instead of Argon2.
///
/// Hashes are distinguishable from plaintext so tests can assert that
/// services never store raw passwords.
pub struct StubPasswordHasher;

const STUB_HASH_PREFIX: &str = "stub$";

impl PasswordHasher for StubPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{STUB_HASH_PREFIX}{password}"))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        let Some(stored) = stored_hash.strip_prefix(STUB_HASH_PREFIX) else {
            return Err(PasswordHashError::malformed_hash(stored_hash));
        };
        Ok(stored == password)
    }
}

/// In-memory credential store enforcing the unique-username invariant.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<UserState>,
}

#[derive(Default)]
struct UserState {
    users: Vec<User>,
    next_id: i64,
}

impl InMemoryUserRepository {
    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().expect("user store lock poisoned").users.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().expect("user store lock poisoned");
        if state
            .users
            .iter()
            .any(|user| user.username() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_str()));
        }

        state.next_id += 1;
        let user = User::from_parts(
            UserId::new(state.next_id),
            username.clone(),
            password_hash.to_owned(),
        );
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("user store lock poisoned");
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("user store lock poisoned");
        Ok(state
            .users
            .iter()
            .find(|user| user.username().as_str() == username)
            .cloned())
    }
}

/// In-memory entry store mirroring the SQL adapter's ordering contract.
#[derive(Default)]
pub struct InMemoryEntryRepository {
    state: Mutex<EntryState>,
}

#[derive(Default)]
struct EntryState {
    entries: Vec<Entry>,
    next_id: i64,
}

impl InMemoryEntryRepository {
    /// Fetch a stored entry directly, bypassing the port.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<Entry> {
        let state = self.state.lock().expect("entry store lock poisoned");
        state.entries.iter().find(|entry| entry.id() == id).cloned()
    }

    /// Insert an entry directly with epoch timestamps, bypassing the port.
    pub fn seed_entry(&self, owner: UserId, title: &str, content: &str, tags: &str) -> Entry {
        let mut state = self.state.lock().expect("entry store lock poisoned");
        state.next_id += 1;
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let entry = Entry::from_parts(
            EntryId::new(state.next_id),
            title.to_owned(),
            content.to_owned(),
            tags.to_owned(),
            now,
            now,
            Some(owner),
        );
        state.entries.push(entry.clone());
        entry
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn insert(
        &self,
        owner: UserId,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<Entry, EntryPersistenceError> {
        let mut state = self.state.lock().expect("entry store lock poisoned");
        state.next_id += 1;
        let entry = Entry::from_parts(
            EntryId::new(state.next_id),
            draft.title().to_owned(),
            draft.content().to_owned(),
            draft.tags().to_owned(),
            now,
            now,
            Some(owner),
        );
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryPersistenceError> {
        Ok(self.entry(id))
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Entry>, EntryPersistenceError> {
        let state = self.state.lock().expect("entry store lock poisoned");
        let mut owned: Vec<Entry> = state
            .entries
            .iter()
            .filter(|entry| entry.user_id() == Some(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().get().cmp(&a.id().get()))
        });
        Ok(owned)
    }

    async fn update(
        &self,
        id: EntryId,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<Entry, EntryPersistenceError> {
        let mut state = self.state.lock().expect("entry store lock poisoned");
        let existing = state
            .entries
            .iter_mut()
            .find(|entry| entry.id() == id)
            .ok_or_else(|| EntryPersistenceError::row_missing(id.get()))?;

        let updated = Entry::from_parts(
            id,
            draft.title().to_owned(),
            draft.content().to_owned(),
            draft.tags().to_owned(),
            existing.created_at(),
            now,
            existing.user_id(),
        );
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: EntryId) -> Result<(), EntryPersistenceError> {
        let mut state = self.state.lock().expect("entry store lock poisoned");
        let before = state.entries.len();
        state.entries.retain(|entry| entry.id() != id);
        if state.entries.len() == before {
            return Err(EntryPersistenceError::row_missing(id.get()));
        }
        Ok(())
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<u64, EntryPersistenceError> {
        let state = self.state.lock().expect("entry store lock poisoned");
        Ok(state
            .entries
            .iter()
            .filter(|entry| entry.user_id() == Some(owner))
            .count() as u64)
    }
}
