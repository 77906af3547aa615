//! Core types for the account directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local account record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Request to create a new account.
///
/// `password_hash` is the already-hashed secret; the directory never
/// sees plaintext passwords.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: u32,
}

/// Request to update an existing account. `None` fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<u32>,
}
