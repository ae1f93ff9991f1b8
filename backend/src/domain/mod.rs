//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic error payload.
//! - [`User`], [`Username`], [`UserId`], [`UserProfile`] — identity types.
//! - [`Entry`], [`EntryDraft`], [`EntryId`] — journal aggregate.
//! - [`Credentials`] — validated login/registration input.
//! - [`DefaultAccountService`], [`DefaultJournalService`] — port
//!   implementations wired by the server.

mod account;
mod auth;
mod entry;
mod error;
mod export;
mod journal;
pub mod ports;
mod user;

pub use self::account::{
    DUPLICATE_USERNAME_MESSAGE, DefaultAccountService, INVALID_LOGIN_MESSAGE,
};
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::entry::{
    Entry, EntryDraft, EntryId, EntryValidationError, TAGS_MAX_LEN, TITLE_MAX_LEN,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::export::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME, entries_to_csv};
pub use self::journal::DefaultJournalService;
pub use self::user::{
    USERNAME_MAX_LEN, USERNAME_MIN_LEN, User, UserId, UserProfile, Username,
    UsernameValidationError,
};
