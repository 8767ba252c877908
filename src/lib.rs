//! Bookshelf API: CRUD REST backend for users and books.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::{AppConfig, DatabaseConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, RouterLimits};
pub use state::AppState;
pub use store::{ensure_database_exists, BookGateway, MemoryStore, PgStore, UserGateway};
