//! Domain ports.
//!
//! Driving ports ([`AccountService`], [`JournalService`]) are called by
//! inbound adapters; driven ports ([`UserRepository`], [`EntryRepository`],
//! [`PasswordHasher`]) are implemented by outbound adapters. Handlers depend
//! only on the driving ports so they stay testable without I/O.

mod account_service;
mod entry_repository;
mod journal_service;
mod password_hasher;
mod user_repository;

pub use account_service::AccountService;
pub use entry_repository::{EntryPersistenceError, EntryRepository};
pub use journal_service::JournalService;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use user_repository::{UserPersistenceError, UserRepository};
