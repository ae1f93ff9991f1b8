//! Server configuration assembled from the process environment.

use std::fmt;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;

use crate::inbound::http::session_config::{
    BuildMode, SessionConfigError, session_settings_from_env,
};
use crate::outbound::persistence::{DbPool, PoolConfig};

const DATABASE_URL_ENV: &str = "JOURNAL_DATABASE_URL";
const BIND_ADDR_ENV: &str = "JOURNAL_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEBUG_DATABASE_URL: &str = "journal.db";

/// Errors raised while assembling the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Session toggles were missing or invalid.
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// The bind address could not be parsed.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// The rejected value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Everything the server needs to bind, sign cookies, and reach the database.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pool_config: PoolConfig,
}

// Manual impl so key material never reaches log output.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("cookie_secure", &self.cookie_secure)
            .field("same_site", &self.same_site)
            .field("bind_addr", &self.bind_addr)
            .field("pool_config", &self.pool_config)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Assemble the configuration from environment variables.
    ///
    /// Debug builds fall back to a local database file and log the fallback;
    /// release builds require the database location to be explicit.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a required variable is missing or invalid
    /// for the given build mode.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let settings = session_settings_from_env(env, mode)?;

        let database_url = match env.string(DATABASE_URL_ENV) {
            Some(url) => url,
            None if matches!(mode, BuildMode::Debug) => {
                warn!(
                    fallback = DEBUG_DATABASE_URL,
                    "JOURNAL_DATABASE_URL not set; using local database file"
                );
                DEBUG_DATABASE_URL.to_owned()
            }
            None => {
                return Err(ConfigError::MissingEnv {
                    name: DATABASE_URL_ENV,
                });
            }
        };

        let raw_addr = env
            .string(BIND_ADDR_ENV)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr,
                source,
            })?;

        Ok(Self {
            key: settings.key,
            cookie_secure: settings.cookie_secure,
            same_site: SameSite::Lax,
            bind_addr,
            pool_config: PoolConfig::new(database_url),
        })
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Build the connection pool for this configuration.
    ///
    /// # Errors
    /// Returns the pool's build error when the database cannot be opened.
    pub fn build_pool(&self) -> Result<DbPool, crate::outbound::persistence::PoolError> {
        DbPool::new(&self.pool_config)
    }
}
