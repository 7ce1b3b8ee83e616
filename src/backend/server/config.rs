/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables
 * (optionally seeded from `.env` by the binary).
 *
 * # Variables
 *
 * - `DATABASE_URL` (required) - PostgreSQL connection string
 * - `DB_NAME` (required) - database to use on that server
 * - `SERVER_PORT` (default 8080)
 * - `BCRYPT_COST` (default `bcrypt::DEFAULT_COST`, 4..=31)
 * - `DB_CONNECT_TIMEOUT_SECS` (default 10)
 * - `DB_TRANSACTION_TIMEOUT_SECS` (default 30)
 * - `DB_MAX_CONNECTIONS` (default 10)
 *
 * # Error Handling
 *
 * Unlike optional integrations, the store is required: a missing or
 * unparsable value is a `ConfigError` and the server does not start.
 */

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::backend::auth::password::{MAX_COST, MIN_COST};
use crate::backend::store::postgres::PgStoreOptions;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TRANSACTION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Startup configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be set")]
    MissingValue { name: &'static str },

    #[error("{name} has invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_name: String,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub connect_timeout: Duration,
    pub transaction_timeout: Duration,
    pub max_connections: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The URL may embed a password.
        f.debug_struct("ServerConfig")
            .field("database_url", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("port", &self.port)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("connect_timeout", &self.connect_timeout)
            .field("transaction_timeout", &self.transaction_timeout)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Values are trimmed; a blank value counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = get("DATABASE_URL").ok_or(ConfigError::MissingValue {
            name: "DATABASE_URL",
        })?;
        let database_name = get("DB_NAME").ok_or(ConfigError::MissingValue { name: "DB_NAME" })?;

        let port = parse_or("SERVER_PORT", get("SERVER_PORT"), DEFAULT_PORT)?;
        let bcrypt_cost = parse_or("BCRYPT_COST", get("BCRYPT_COST"), bcrypt::DEFAULT_COST)?;
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: format!("must be between {} and {}", MIN_COST, MAX_COST),
            });
        }

        let connect_timeout = parse_or(
            "DB_CONNECT_TIMEOUT_SECS",
            get("DB_CONNECT_TIMEOUT_SECS"),
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        let transaction_timeout = parse_or(
            "DB_TRANSACTION_TIMEOUT_SECS",
            get("DB_TRANSACTION_TIMEOUT_SECS"),
            DEFAULT_TRANSACTION_TIMEOUT_SECS,
        )?;
        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            get("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;

        Ok(Self {
            database_url,
            database_name,
            port,
            bcrypt_cost,
            connect_timeout: Duration::from_secs(connect_timeout),
            transaction_timeout: Duration::from_secs(transaction_timeout),
            max_connections,
        })
    }

    /// Pool settings derived from this configuration
    pub fn store_options(&self) -> PgStoreOptions {
        PgStoreOptions {
            max_connections: self.max_connections,
            connect_timeout: self.connect_timeout,
        }
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}
