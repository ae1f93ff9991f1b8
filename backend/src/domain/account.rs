//! Account service orchestrating the credential store and password hasher.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AccountService, EntryPersistenceError, EntryRepository, PasswordHashError, PasswordHasher,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Credentials, Error, User, UserId, UserProfile};

/// Generic failure message for both unknown usernames and wrong passwords.
///
/// The non-disclosure is deliberate: a caller must not be able to enumerate
/// registered usernames from login responses.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password.";

/// User-visible message for a registration against a taken username.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username already taken. Try another.";

/// Default [`AccountService`] implementation over the persistence ports.
#[derive(Clone)]
pub struct DefaultAccountService {
    users: Arc<dyn UserRepository>,
    entries: Arc<dyn EntryRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl DefaultAccountService {
    /// Create a new account service from its ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        entries: Arc<dyn EntryRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            entries,
            hasher,
        }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

pub(crate) fn map_entry_persistence_error(error: EntryPersistenceError) -> Error {
    match error {
        EntryPersistenceError::Connection { message } => Error::service_unavailable(message),
        EntryPersistenceError::Query { message } => Error::internal(message),
        EntryPersistenceError::RowMissing { .. } => Error::not_found("Entry not found."),
    }
}

fn map_password_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl AccountService for DefaultAccountService {
    async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_password_hash_error)?;

        self.users
            .insert(credentials.username(), &password_hash)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_username(credentials.username().as_str())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_LOGIN_MESSAGE))?;

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_password_hash_error)?;
        if verified {
            Ok(user)
        } else {
            Err(Error::unauthorized(INVALID_LOGIN_MESSAGE))
        }
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn profile(&self, id: UserId) -> Result<UserProfile, Error> {
        let user = self
            .find_user(id)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        let entry_count = self
            .entries
            .count_by_owner(id)
            .await
            .map_err(map_entry_persistence_error)?;
        Ok(UserProfile { user, entry_count })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registration and authentication flows.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::{InMemoryEntryRepository, InMemoryUserRepository, StubPasswordHasher};
    use rstest::rstest;

    fn service_with_repos(
        users: Arc<InMemoryUserRepository>,
        entries: Arc<InMemoryEntryRepository>,
    ) -> DefaultAccountService {
        DefaultAccountService::new(users, entries, Arc::new(StubPasswordHasher))
    }

    fn service() -> DefaultAccountService {
        service_with_repos(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(InMemoryEntryRepository::default()),
        )
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(username, password).expect("valid test credentials")
    }

    #[tokio::test]
    async fn register_persists_a_hashed_verifier() {
        let accounts = service();
        let user = accounts
            .register(&credentials("alice", "secret123"))
            .await
            .expect("registration succeeds");

        assert_eq!(user.username().as_str(), "alice");
        assert_ne!(user.password_hash(), "secret123");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts_and_creates_no_second_user() {
        let users = Arc::new(InMemoryUserRepository::default());
        let accounts = service_with_repos(
            users.clone(),
            Arc::new(InMemoryEntryRepository::default()),
        );

        accounts
            .register(&credentials("alice", "secret123"))
            .await
            .expect("first registration succeeds");
        let err = accounts
            .register(&credentials("alice", "other-password"))
            .await
            .expect_err("second registration must conflict");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
        assert_eq!(users.len(), 1);
    }

    #[rstest]
    #[case("alice", "wrong")]
    #[case("nobody", "secret123")]
    #[tokio::test]
    async fn bad_logins_fail_with_a_uniform_message(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let accounts = service();
        accounts
            .register(&credentials("alice", "secret123"))
            .await
            .expect("registration succeeds");

        let err = accounts
            .authenticate(&credentials(username, password))
            .await
            .expect_err("bad login must fail");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
    }

    #[tokio::test]
    async fn correct_password_authenticates() {
        let accounts = service();
        let registered = accounts
            .register(&credentials("alice", "secret123"))
            .await
            .expect("registration succeeds");

        let user = accounts
            .authenticate(&credentials("alice", "secret123"))
            .await
            .expect("login succeeds");
        assert_eq!(user.id(), registered.id());
    }

    #[tokio::test]
    async fn profile_counts_owned_entries() {
        let users = Arc::new(InMemoryUserRepository::default());
        let entries = Arc::new(InMemoryEntryRepository::default());
        let accounts = service_with_repos(users, entries.clone());

        let user = accounts
            .register(&credentials("alice", "secret123"))
            .await
            .expect("registration succeeds");
        entries.seed_entry(user.id(), "Day 1", "Went hiking", "outdoors");
        entries.seed_entry(user.id(), "Day 2", "Rested", "");

        let profile = accounts.profile(user.id()).await.expect("profile loads");
        assert_eq!(profile.entry_count, 2);
        assert_eq!(profile.user.username().as_str(), "alice");
    }

    #[tokio::test]
    async fn stale_session_id_is_unauthorized() {
        let accounts = service();
        let err = accounts
            .profile(UserId::new(999))
            .await
            .expect_err("unknown id must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
