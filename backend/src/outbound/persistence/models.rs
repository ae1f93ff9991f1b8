//! Row structs bridging the Diesel schema and the domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::{EntryPersistenceError, UserPersistenceError};
use crate::domain::{Entry, EntryDraft, EntryId, User, UserId, Username};

use super::schema::{entries, users};

/// A stored user row.
#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl UserRow {
    /// Rehydrate the domain user, re-validating the stored username.
    pub fn into_domain(self) -> Result<User, UserPersistenceError> {
        let username = Username::new(&self.username).map_err(|err| {
            UserPersistenceError::query(format!("stored username invalid: {err}"))
        })?;
        Ok(User::from_parts(
            UserId::new(self.id),
            username,
            self.password_hash,
        ))
    }
}

/// Insertable user row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// A stored entry row.
#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EntryRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub user_id: Option<i64>,
}

impl EntryRow {
    /// Rehydrate the domain entry. Stored timestamps are UTC.
    pub fn into_domain(self) -> Entry {
        Entry::from_parts(
            EntryId::new(self.id),
            self.title,
            self.content,
            self.tags,
            utc(self.created_at),
            utc(self.updated_at),
            self.user_id.map(UserId::new),
        )
    }
}

/// Insertable entry row.
#[derive(Debug, Insertable)]
#[diesel(table_name = entries)]
pub struct NewEntryRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub tags: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub user_id: Option<i64>,
}

impl<'a> NewEntryRow<'a> {
    /// Build an insertable row from a validated draft.
    pub fn from_draft(owner: UserId, draft: &'a EntryDraft, now: DateTime<Utc>) -> Self {
        Self {
            title: draft.title(),
            content: draft.content(),
            tags: draft.tags(),
            created_at: now.naive_utc(),
            updated_at: now.naive_utc(),
            user_id: Some(owner.get()),
        }
    }
}

/// Changeset for the edit flow; `created_at` and `user_id` stay untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = entries)]
pub struct EntryChanges<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub tags: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> EntryChanges<'a> {
    /// Build a changeset from a validated draft.
    pub fn from_draft(draft: &'a EntryDraft, now: DateTime<Utc>) -> Self {
        Self {
            title: draft.title(),
            content: draft.content(),
            tags: draft.tags(),
            updated_at: now.naive_utc(),
        }
    }
}

fn utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

/// Map pool failures into the entry repository's error space.
impl From<super::pool::PoolError> for EntryPersistenceError {
    fn from(error: super::pool::PoolError) -> Self {
        Self::connection(error.to_string())
    }
}

/// Map pool failures into the user repository's error space.
impl From<super::pool::PoolError> for UserPersistenceError {
    fn from(error: super::pool::PoolError) -> Self {
        Self::connection(error.to_string())
    }
}
