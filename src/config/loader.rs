//! Load config from environment variables.

use std::str::FromStr;
use std::time::Duration;

use super::types::{AppConfig, DatabaseConfig};
use crate::error::ConfigError;

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseConfig {
            url: get("DATABASE_URL"),
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(&get, "DB_PORT", 5432)?,
            username: get("DB_USERNAME").unwrap_or_else(|| "postgres".into()),
            password: get("DB_PASSWORD").unwrap_or_default(),
            name: get("DB_NAME").unwrap_or_else(|| "bookshelf".into()),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5)?,
        };

        Ok(Self {
            port: parse_or(&get, "APP_PORT", 8000)?,
            database,
            jwt_secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_expiry: Duration::from_secs(parse_or(&get, "JWT_EXPIRY_SECS", 3600)?),
            request_timeout: Duration::from_secs(parse_or(&get, "REQUEST_TIMEOUT_SECS", 30)?),
            body_limit: parse_or(&get, "BODY_LIMIT_BYTES", 1024 * 1024)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
