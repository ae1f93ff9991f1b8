//! Diesel/SQLite adapter for the entry repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::domain::ports::{EntryPersistenceError, EntryRepository};
use crate::domain::{Entry, EntryDraft, EntryId, UserId};

use super::models::{EntryChanges, EntryRow, NewEntryRow};
use super::pool::DbPool;
use super::schema::entries;

/// Entry repository backed by the pooled SQLite database.
#[derive(Clone)]
pub struct DieselEntryRepository {
    pool: DbPool,
}

impl DieselEntryRepository {
    /// Create a repository over the shared pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_query_error(error: DieselError) -> EntryPersistenceError {
    EntryPersistenceError::query(error.to_string())
}

#[async_trait]
impl EntryRepository for DieselEntryRepository {
    async fn insert(
        &self,
        owner: UserId,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<Entry, EntryPersistenceError> {
        let draft = draft.clone();
        self.pool
            .run(move |conn| {
                let row: EntryRow = diesel::insert_into(entries::table)
                    .values(NewEntryRow::from_draft(owner, &draft, now))
                    .get_result(conn)
                    .map_err(map_query_error)?;
                Ok(row.into_domain())
            })
            .await
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryPersistenceError> {
        self.pool
            .run(move |conn| {
                let row: Option<EntryRow> = entries::table
                    .find(id.get())
                    .first(conn)
                    .optional()
                    .map_err(map_query_error)?;
                Ok(row.map(EntryRow::into_domain))
            })
            .await
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Entry>, EntryPersistenceError> {
        self.pool
            .run(move |conn| {
                let rows: Vec<EntryRow> = entries::table
                    .filter(entries::user_id.eq(owner.get()))
                    .order((entries::created_at.desc(), entries::id.desc()))
                    .load(conn)
                    .map_err(map_query_error)?;
                Ok(rows.into_iter().map(EntryRow::into_domain).collect())
            })
            .await
    }

    async fn update(
        &self,
        id: EntryId,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<Entry, EntryPersistenceError> {
        let draft = draft.clone();
        self.pool
            .run(move |conn| {
                let row: EntryRow = diesel::update(entries::table.find(id.get()))
                    .set(EntryChanges::from_draft(&draft, now))
                    .get_result(conn)
                    .map_err(|err| match err {
                        DieselError::NotFound => EntryPersistenceError::row_missing(id.get()),
                        other => map_query_error(other),
                    })?;
                Ok(row.into_domain())
            })
            .await
    }

    async fn delete(&self, id: EntryId) -> Result<(), EntryPersistenceError> {
        self.pool
            .run(move |conn| {
                let deleted = diesel::delete(entries::table.find(id.get()))
                    .execute(conn)
                    .map_err(map_query_error)?;
                if deleted == 0 {
                    return Err(EntryPersistenceError::row_missing(id.get()));
                }
                Ok(())
            })
            .await
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<u64, EntryPersistenceError> {
        self.pool
            .run(move |conn| {
                let count: i64 = entries::table
                    .filter(entries::user_id.eq(owner.get()))
                    .count()
                    .get_result(conn)
                    .map_err(map_query_error)?;
                Ok(count.unsigned_abs())
            })
            .await
    }
}
