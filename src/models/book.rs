use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// Column kept for schema parity; nothing writes it.
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Scalar fields written by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
}

/// Body of POST /books and PUT /books/:id. Missing fields become empty strings.
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub publisher: String,
}

impl From<BookRequest> for NewBook {
    fn from(req: BookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            publisher: req.publisher,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BookResponse {
    pub title: String,
    pub author: String,
    pub publisher: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            author: book.author,
            publisher: book.publisher,
        }
    }
}
