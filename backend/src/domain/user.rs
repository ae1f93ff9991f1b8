//! User identity types.
//!
//! A user is created once at registration and never mutated afterwards; the
//! stored verifier is an Argon2id PHC string, never a plaintext password.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Minimum username length accepted at registration and login.
pub const USERNAME_MIN_LEN: usize = 3;
/// Maximum username length, mirroring the storage column width.
pub const USERNAME_MAX_LEN: usize = 150;

/// Integer identifier assigned to a user by the persistence layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw store-assigned identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value for persistence adapters.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`Username`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// Username was shorter than [`USERNAME_MIN_LEN`] once trimmed.
    TooShort,
    /// Username exceeded [`USERNAME_MAX_LEN`] characters.
    TooLong,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => {
                write!(f, "username must be at least {USERNAME_MIN_LEN} characters")
            }
            Self::TooLong => {
                write!(f, "username must be at most {USERNAME_MAX_LEN} characters")
            }
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Unique, case-sensitive username chosen at registration.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace.
/// - Between [`USERNAME_MIN_LEN`] and [`USERNAME_MAX_LEN`] characters.
///
/// # Examples
/// ```
/// use journal_backend::domain::Username;
///
/// let name = Username::new("alice").unwrap();
/// assert_eq!(name.as_str(), "alice");
/// assert!(Username::new("ab").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Construct a username from raw input, trimming whitespace.
    pub fn new(raw: &str) -> Result<Self, UsernameValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < USERNAME_MIN_LEN {
            return Err(UsernameValidationError::TooShort);
        }
        if trimmed.chars().count() > USERNAME_MAX_LEN {
            return Err(UsernameValidationError::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Username as a string slice, suitable for lookups.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Registered user with their stored password verifier.
///
/// The verifier is deliberately not serialised; inbound adapters expose users
/// through dedicated response types that omit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: String,
}

impl User {
    /// Rehydrate a user from stored parts.
    pub const fn from_parts(id: UserId, username: Username, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Unique username.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Stored PHC-format password verifier.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

/// A user together with the number of entries they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// The profiled user.
    pub user: User,
    /// Count of journal entries owned by the user.
    pub entry_count: u64,
}
