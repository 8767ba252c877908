//! Persistence gateways for users and books.
//!
//! Soft-deleted rows are invisible to every operation. `get`, `update` and `delete` return
//! `Ok(None)` when no live row carries the id.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use async_trait::async_trait;

use crate::auth::{verify_password, TokenIssuer};
use crate::error::AppError;
use crate::models::{Book, NewBook, NewUser, User};

#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Live users in id order.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    /// Overwrites name, email and password.
    async fn update(&self, user: &NewUser, id: i64) -> Result<Option<User>, AppError>;

    async fn delete(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Live users with exactly this email, in id order.
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, AppError>;

    async fn store_token(&self, id: i64, token: &str) -> Result<Option<User>, AppError>;

    /// First user whose email matches and whose password verifies gets a fresh token.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        tokens: &TokenIssuer,
    ) -> Result<User, AppError> {
        let candidates = self.find_by_email(email).await?;
        let password = password.to_owned();
        // Verification runs on the blocking pool.
        let user = tokio::task::spawn_blocking(move || {
            candidates
                .into_iter()
                .find(|u| verify_password(&password, &u.password))
        })
        .await
        .map_err(|e| AppError::Internal(format!("spawn password verification task: {}", e)))?
        .ok_or_else(|| AppError::Unauthorized("invalid email or password".into()))?;
        let token = tokens.issue(user.id)?;
        self.store_token(user.id, &token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid email or password".into()))
    }
}

#[async_trait]
pub trait BookGateway: Send + Sync {
    /// Live books in id order.
    async fn list(&self) -> Result<Vec<Book>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<Book>, AppError>;

    async fn create(&self, book: &NewBook) -> Result<Book, AppError>;

    /// Overwrites title, author and publisher.
    async fn update(&self, book: &NewBook, id: i64) -> Result<Option<Book>, AppError>;

    async fn delete(&self, id: i64) -> Result<Option<Book>, AppError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}
