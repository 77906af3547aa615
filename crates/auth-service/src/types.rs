//! Wire types for the auth RPC surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracer_accounts_core::Account;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginAlumniRequest {
    pub national_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRespondentRequest {
    pub supervisor_name: String,
    pub supervisor_email: String,
    pub supervisor_phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginLocalRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: u32,
}

/// Uniform login result shape.
///
/// `code` follows the transport-independent taxonomy; callers can
/// distinguish success, missing identity, bad credentials and
/// provider/internal failure without inspecting the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn success(message: &str, token: String) -> Self {
        Self {
            code: 200,
            message: message.to_string(),
            token: Some(token),
        }
    }

    pub fn rejected(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            token: None,
        }
    }
}

/// Account profile as returned to callers; never carries the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role_id: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            username: account.username,
            email: account.email,
            role_id: account.role_id,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Uniform single-account result shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountProfile>,
}

impl AccountResponse {
    pub fn success(code: u16, message: &str, account: AccountProfile) -> Self {
        Self {
            code,
            message: message.to_string(),
            account: Some(account),
        }
    }

    pub fn rejected(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            account: None,
        }
    }
}

/// Body returned by the enforcement point on rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}
