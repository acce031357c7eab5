//! Server configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `HOST` | `0.0.0.0` | Listen address |
//! | `PORT` | `8000` | Listen port |
//! | `STORAGE_MODE` | `in_memory` | `in_memory` or `postgres` |
//! | `DATABASE_URL` | (none) | Required when `STORAGE_MODE=postgres` |
//! | `DATABASE_POOL_SIZE` | `8` | Maximum pooled connections |
//! | `KANBAN_API_TOKENS` | (empty) | `username:token` pairs, `!` prefix denies |

use crate::identity::{ParseTokenTableError, StaticTokenIdentityProvider};
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_SIZE: u32 = 8;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A variable required by the selected storage mode is missing.
    #[error("{0} must be set when STORAGE_MODE=postgres")]
    Missing(&'static str),

    /// The token table is malformed.
    #[error(transparent)]
    Tokens(#[from] ParseTokenTableError),
}

/// Where board records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Process-local storage; contents are lost on restart.
    InMemory,
    /// `PostgreSQL` storage.
    Postgres {
        /// Connection URL.
        database_url: String,
        /// Maximum pooled connections.
        pool_size: u32,
    },
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub listen: SocketAddr,
    /// Storage backend.
    pub storage: StorageConfig,
    /// Identity provider built from `KANBAN_API_TOKENS`.
    pub identity: StaticTokenIdentityProvider,
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host_value = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let host = parse_value::<IpAddr>("HOST", &host_value)?;
        let port = read("PORT").map_or(Ok(DEFAULT_PORT), |value| parse_value("PORT", &value))?;

        let storage = match read("STORAGE_MODE").as_deref().map(str::trim) {
            None | Some("in_memory") => StorageConfig::InMemory,
            Some("postgres") => StorageConfig::Postgres {
                database_url: read("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                pool_size: read("DATABASE_POOL_SIZE").map_or(Ok(DEFAULT_POOL_SIZE), |value| {
                    parse_pool_size(&value)
                })?,
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "STORAGE_MODE",
                    value: other.to_owned(),
                    reason: "expected in_memory or postgres".to_owned(),
                });
            }
        };

        let identity = StaticTokenIdentityProvider::parse(
            read("KANBAN_API_TOKENS").as_deref().unwrap_or_default(),
        )?;

        Ok(Self {
            listen: SocketAddr::new(host, port),
            storage,
            identity,
        })
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| ConfigError::InvalidValue {
            name,
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

fn parse_pool_size(value: &str) -> Result<u32, ConfigError> {
    let size = parse_value::<u32>("DATABASE_POOL_SIZE", value)?;
    if size == 0 {
        return Err(ConfigError::InvalidValue {
            name: "DATABASE_POOL_SIZE",
            value: value.to_owned(),
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(size)
}
