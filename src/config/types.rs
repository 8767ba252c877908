//! Runtime configuration, built once in `main` and handed to the components that need it.

use chrono::Duration as ChronoDuration;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Takes precedence over the discrete fields when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: e.to_string(),
            }),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.username)
                .password(&self.password)
                .database(&self.name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_expiry: Duration,
    pub request_timeout: Duration,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn token_ttl(&self) -> ChronoDuration {
        ChronoDuration::from_std(self.jwt_expiry).unwrap_or_else(|_| ChronoDuration::hours(1))
    }
}
