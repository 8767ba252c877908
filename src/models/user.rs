use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::validation::{FieldRule, RequestValidator};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password: String,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Scalar fields written by create and update. `password` is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of POST /users, PUT /users/:id and POST /users/register. Missing fields become empty
/// strings.
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserRequest {
    /// Field checks applied on register only; plain create and update accept any strings.
    pub fn validate(&self) -> Result<(), AppError> {
        RequestValidator::validate(&[
            ("name", self.name.as_str(), FieldRule::required().max_length(255)),
            ("email", self.email.as_str(), FieldRule::required().email().max_length(255)),
            ("password", self.password.as_str(), FieldRule::required().min_length(6)),
        ])
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        RequestValidator::validate(&[
            ("email", self.email.as_str(), FieldRule::required()),
            ("password", self.password.as_str(), FieldRule::required()),
        ])
    }
}

/// Public view of a user: password and token never leave the server.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}
