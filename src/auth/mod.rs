//! Credential handling: password hashing and login tokens.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, Argon2Params};
pub use token::{Claims, TokenIssuer};
