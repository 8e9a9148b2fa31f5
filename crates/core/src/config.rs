//! Startup configuration.
//!
//! Values are read from the environment once and passed explicitly to the
//! components that need them.

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_PASSWORD, DEFAULT_API_USER, DEFAULT_DATABASE_URL, DEFAULT_TOKEN_TTL_SECS,
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use crate::env_config::{env_first_non_empty, env_parse_with_default};

/// Connection settings for the PostgreSQL store.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: PG_POOL_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS),
        }
    }

    /// Build from the environment.
    ///
    /// `url_override` (e.g. a CLI flag) wins over `DATABASE_URL`, which wins
    /// over the legacy `PG_CONN`.
    #[must_use]
    pub fn from_env(url_override: Option<String>) -> Self {
        let url = url_override
            .filter(|u| !u.trim().is_empty())
            .or_else(|| env_first_non_empty(&["DATABASE_URL", "PG_CONN"]))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        Self {
            url,
            max_connections: env_parse_with_default(
                "BOOKSHELF_PG_MAX_CONNECTIONS",
                PG_POOL_MAX_CONNECTIONS,
            ),
            acquire_timeout: Duration::from_secs(env_parse_with_default(
                "BOOKSHELF_PG_ACQUIRE_TIMEOUT_SECS",
                PG_POOL_ACQUIRE_TIMEOUT_SECS,
            )),
        }
    }
}

// The URL may carry a password.
impl Debug for DatabaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish_non_exhaustive()
    }
}

/// Login credentials and token signing settings for the HTTP API.
#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    #[must_use]
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            username: DEFAULT_API_USER.to_owned(),
            password: DEFAULT_API_PASSWORD.to_owned(),
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
        }
    }

    /// Build from the environment. Returns `None` when `BOOKSHELF_JWT_SECRET`
    /// is unset, since tokens cannot be signed without it.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let jwt_secret = env_first_non_empty(&["BOOKSHELF_JWT_SECRET"])?;
        Some(Self {
            username: env_first_non_empty(&["BOOKSHELF_API_USER"])
                .unwrap_or_else(|| DEFAULT_API_USER.to_owned()),
            password: env_first_non_empty(&["BOOKSHELF_API_PASSWORD"])
                .unwrap_or_else(|| DEFAULT_API_PASSWORD.to_owned()),
            jwt_secret,
            token_ttl: Duration::from_secs(env_parse_with_default(
                "BOOKSHELF_TOKEN_TTL_SECS",
                DEFAULT_TOKEN_TTL_SECS,
            )),
        })
    }
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
