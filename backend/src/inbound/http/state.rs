//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{AccountService, JournalService};

/// Service handles shared across worker threads.
#[derive(Clone)]
pub struct HttpState {
    accounts: Arc<dyn AccountService>,
    journal: Arc<dyn JournalService>,
}

impl HttpState {
    /// Bundle the driving services for handler injection.
    pub fn new(accounts: Arc<dyn AccountService>, journal: Arc<dyn JournalService>) -> Self {
        Self { accounts, journal }
    }

    /// Account registration, login, and profile operations.
    pub fn accounts(&self) -> &dyn AccountService {
        self.accounts.as_ref()
    }

    /// Journal entry operations.
    pub fn journal(&self) -> &dyn JournalService {
        self.journal.as_ref()
    }
}
