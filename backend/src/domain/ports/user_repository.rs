//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-reported failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-reported failure description.
        message: String,
    },
    /// The unique-username invariant rejected an insert.
    #[error("username already registered: {username}")]
    DuplicateUsername {
        /// The username that collided.
        username: String,
    },
}

impl UserPersistenceError {
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

    /// Create a duplicate-username error for the given username.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }
}

/// Driven port for the credential store.
///
/// The repository performs no authorization and no hashing; it persists and
/// looks up users exactly as instructed by the account service.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning an identifier.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username is already taken.
    async fn insert(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by their case-sensitive username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError>;
}
