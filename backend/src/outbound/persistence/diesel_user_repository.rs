//! Diesel/SQLite adapter for the user repository port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// User repository backed by the pooled SQLite database.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the shared pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: DieselError, username: &str) -> UserPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(message = info.message(), "unique constraint rejected insert");
            UserPersistenceError::duplicate_username(username)
        }
        other => UserPersistenceError::query(other.to_string()),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError> {
        let username = username.as_str().to_owned();
        let password_hash = password_hash.to_owned();
        self.pool
            .run(move |conn| {
                let row: UserRow = diesel::insert_into(users::table)
                    .values(NewUserRow {
                        username: &username,
                        password_hash: &password_hash,
                    })
                    .get_result(conn)
                    .map_err(|err| map_diesel_error(err, &username))?;
                row.into_domain()
            })
            .await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.pool
            .run(move |conn| {
                let row: Option<UserRow> = users::table
                    .find(id.get())
                    .first(conn)
                    .optional()
                    .map_err(|err| UserPersistenceError::query(err.to_string()))?;
                row.map(UserRow::into_domain).transpose()
            })
            .await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let username = username.to_owned();
        self.pool
            .run(move |conn| {
                let row: Option<UserRow> = users::table
                    .filter(users::username.eq(&username))
                    .first(conn)
                    .optional()
                    .map_err(|err| UserPersistenceError::query(err.to_string()))?;
                row.map(UserRow::into_domain).transpose()
            })
            .await
    }
}
