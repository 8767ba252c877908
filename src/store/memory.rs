//! In-process gateways. Same contract as the PostgreSQL store; used by tests and local runs.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BookGateway, HealthCheck, UserGateway};
use crate::error::AppError;
use crate::models::{Book, NewBook, NewUser, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    books: Vec<Book>,
    next_user_id: i64,
    next_book_id: i64,
}

/// Rows are kept in insertion order; ids come from per-table counters and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

fn live_user(tables: &mut Tables, id: i64) -> Option<&mut User> {
    tables
        .users
        .iter_mut()
        .find(|u| u.id == id && u.deleted_at.is_none())
}

fn live_book(tables: &mut Tables, id: i64) -> Option<&mut Book> {
    tables
        .books
        .iter_mut()
        .find(|b| b.id == id && b.deleted_at.is_none())
}

#[async_trait]
impl UserGateway for MemoryStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.write()?;
        tables.next_user_id += 1;
        let now = Utc::now();
        let row = User {
            id: tables.next_user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            token: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn update(&self, user: &NewUser, id: i64) -> Result<Option<User>, AppError> {
        let mut tables = self.write()?;
        Ok(live_user(&mut tables, id).map(|row| {
            row.name = user.name.clone();
            row.email = user.email.clone();
            row.password = user.password.clone();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<User>, AppError> {
        let mut tables = self.write()?;
        Ok(live_user(&mut tables, id).map(|row| {
            row.deleted_at = Some(Utc::now());
            row.clone()
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .filter(|u| u.email == email && u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn store_token(&self, id: i64, token: &str) -> Result<Option<User>, AppError> {
        let mut tables = self.write()?;
        Ok(live_user(&mut tables, id).map(|row| {
            row.token = Some(token.to_string());
            row.updated_at = Utc::now();
            row.clone()
        }))
    }
}

#[async_trait]
impl BookGateway for MemoryStore {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .books
            .iter()
            .filter(|b| b.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Book>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .books
            .iter()
            .find(|b| b.id == id && b.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, book: &NewBook) -> Result<Book, AppError> {
        let mut tables = self.write()?;
        tables.next_book_id += 1;
        let now = Utc::now();
        let row = Book {
            id: tables.next_book_id,
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            token: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.books.push(row.clone());
        Ok(row)
    }

    async fn update(&self, book: &NewBook, id: i64) -> Result<Option<Book>, AppError> {
        let mut tables = self.write()?;
        Ok(live_book(&mut tables, id).map(|row| {
            row.title = book.title.clone();
            row.author = book.author.clone();
            row.publisher = book.publisher.clone();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Book>, AppError> {
        let mut tables = self.write()?;
        Ok(live_book(&mut tables, id).map(|row| {
            row.deleted_at = Some(Utc::now());
            row.clone()
        }))
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
