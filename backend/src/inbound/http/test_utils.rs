//! Shared helpers for HTTP handler tests.

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::{SessionMiddleware, config::CookieContentSecurity};
use actix_web::cookie::{Key, SameSite};
use chrono::{TimeZone, Utc};
use mockable::Clock;

use crate::domain::{DefaultAccountService, DefaultJournalService};
use crate::test_support::{
    FixedClock, InMemoryEntryRepository, InMemoryUserRepository, StubPasswordHasher,
};

use super::state::HttpState;

/// Session middleware matching production cookie settings, minus `Secure`.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}

/// In-memory fixture wiring the full service stack behind [`HttpState`].
pub struct TestBackend {
    /// Shared handler state built over the in-memory adapters.
    pub state: HttpState,
    /// Direct handle on the entry store for seeding and assertions.
    pub entries: Arc<InMemoryEntryRepository>,
    /// Direct handle on the user store.
    pub users: Arc<InMemoryUserRepository>,
    /// The clock driving entry timestamps.
    pub clock: Arc<FixedClock>,
}

/// Build an in-memory backend pinned to a fixed instant.
pub fn test_backend() -> TestBackend {
    let users = Arc::new(InMemoryUserRepository::default());
    let entries = Arc::new(InMemoryEntryRepository::default());
    let clock = Arc::new(FixedClock::at(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    ));

    let accounts = DefaultAccountService::new(
        users.clone(),
        entries.clone(),
        Arc::new(StubPasswordHasher),
    );
    let journal = DefaultJournalService::new(entries.clone(), clock.clone() as Arc<dyn Clock>);
    let state = HttpState::new(Arc::new(accounts), Arc::new(journal));

    TestBackend {
        state,
        entries,
        users,
        clock,
    }
}
