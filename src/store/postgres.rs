//! PostgreSQL gateways over a shared pool.

use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};

use super::{BookGateway, HealthCheck, UserGateway};
use crate::error::AppError;
use crate::models::{Book, NewBook, NewUser, User};

const USER_COLUMNS: &str = "id, name, email, password, token, created_at, updated_at, deleted_at";
const BOOK_COLUMNS: &str = "id, title, author, publisher, token, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserGateway for PgStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE deleted_at IS NULL ORDER BY id",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, user: &NewUser, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET name = $1, email = $2, password = $3, updated_at = NOW() \
             WHERE id = $4 AND deleted_at IS NULL RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL ORDER BY id",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn store_token(&self, id: i64, token: &str) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET token = $1, updated_at = NOW() \
             WHERE id = $2 AND deleted_at IS NULL RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(token)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl BookGateway for PgStore {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let sql = format!(
            "SELECT {} FROM books WHERE deleted_at IS NULL ORDER BY id",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Book>, AppError> {
        let sql = format!(
            "SELECT {} FROM books WHERE id = $1 AND deleted_at IS NULL",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create(&self, book: &NewBook) -> Result<Book, AppError> {
        let sql = format!(
            "INSERT INTO books (title, author, publisher) VALUES ($1, $2, $3) RETURNING {}",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.publisher)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, book: &NewBook, id: i64) -> Result<Option<Book>, AppError> {
        let sql = format!(
            "UPDATE books SET title = $1, author = $2, publisher = $3, updated_at = NOW() \
             WHERE id = $4 AND deleted_at IS NULL RETURNING {}",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.publisher)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<Option<Book>, AppError> {
        let sql = format!(
            "UPDATE books SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the target database exists; create it if not. Connects to the default `postgres`
/// database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = options.get_database().unwrap_or_default().to_string();
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn = options.clone().database("postgres").connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
