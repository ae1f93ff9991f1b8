//! Port abstraction for one-way password hashing.

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing the password failed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Adapter-reported failure description.
        message: String,
    },
    /// The stored verifier could not be parsed.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash {
        /// Adapter-reported failure description.
        message: String,
    },
}

impl PasswordHashError {
    /// Create a hashing error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Create a malformed-hash error with the given message.
    pub fn malformed_hash(message: impl Into<String>) -> Self {
        Self::MalformedHash {
            message: message.into(),
        }
    }
}

/// Driven port hiding the concrete hash algorithm from the account service.
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted one-way verifier from a plaintext password.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored verifier.
    ///
    /// A wrong password yields `Ok(false)`; only infrastructure failures
    /// produce an error.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError>;
}
