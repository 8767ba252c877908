//! Persisted entities and their request/response shapes.

pub mod book;
pub mod user;

pub use book::{Book, BookRequest, BookResponse, NewBook};
pub use user::{LoginRequest, NewUser, User, UserRequest, UserResponse};
