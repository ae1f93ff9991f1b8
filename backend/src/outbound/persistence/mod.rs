//! SQLite persistence adapters built on Diesel.

mod diesel_entry_repository;
mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

pub use diesel_entry_repository::DieselEntryRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Migrations compiled into the binary so deployments need no separate step.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying embedded migrations.
#[derive(Debug, thiserror::Error)]
#[error("failed to run migrations: {message}")]
pub struct MigrationError {
    message: String,
}

/// Apply any pending embedded migrations.
///
/// # Errors
/// Returns [`MigrationError`] when a migration fails; the database is left at
/// the last successfully applied version.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), MigrationError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
