//! Driving port for account use-cases.
//!
//! Inbound adapters call this port to register, authenticate, and resolve
//! users without knowing the backing infrastructure, which keeps HTTP handler
//! tests deterministic.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User, UserId, UserProfile};

/// Domain use-case port for account management.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user from validated credentials.
    ///
    /// Fails with a conflict error when the username is already taken.
    async fn register(&self, credentials: &Credentials) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown usernames and wrong passwords fail with the same generic
    /// unauthorized error; the non-disclosure is deliberate.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error>;

    /// Resolve a user from a session identity.
    ///
    /// Returns `Ok(None)` when the id no longer resolves, which callers treat
    /// as an unauthenticated (stale) session.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;

    /// The user together with the count of entries they own.
    async fn profile(&self, id: UserId) -> Result<UserProfile, Error>;
}
