//! Account storage

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{Account, CreateAccountRequest, UpdateAccountRequest};

/// Account directory interface.
///
/// Lookups that miss return `Ok(None)`; storage faults are errors.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
    async fn create(&self, request: CreateAccountRequest) -> Result<Account>;
    async fn update(&self, id: &str, request: UpdateAccountRequest) -> Result<Account>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn list(&self) -> Result<Vec<Account>>;
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role_id       INTEGER NOT NULL,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);
"#;

/// SQLite-backed account directory.
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        info!(database_url, "account store ready");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn find_by_column(&self, column: &'static str, value: &str) -> Result<Option<Account>> {
        let query = format!("SELECT * FROM accounts WHERE {} = ?", column);
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>> {
        self.find_by_column("id", id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.find_by_column("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.find_by_column("email", email).await
    }

    async fn create(&self, request: CreateAccountRequest) -> Result<Account> {
        let now = Utc::now();
        let account = Account {
            id: Account::new_id(),
            name: request.name,
            username: request.username,
            email: request.email,
            password_hash: request.password_hash,
            role_id: request.role_id,
            created_at: now,
            updated_at: now,
        };

        let result = sqlx::query(
            "INSERT INTO accounts (id, name, username, email, password_hash, role_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role_id)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(account),
            Err(e) => {
                if e.as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false)
                {
                    Err(Error::AlreadyExists(account.username))
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn update(&self, id: &str, request: UpdateAccountRequest) -> Result<Account> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let updated = Account {
            name: request.name.unwrap_or(current.name),
            email: request.email.unwrap_or(current.email),
            role_id: request.role_id.unwrap_or(current.role_id),
            updated_at: Utc::now(),
            ..current
        };

        sqlx::query(
            "UPDATE accounts SET name = ?, email = ?, role_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&updated.name)
        .bind(&updated.email)
        .bind(updated.role_id)
        .bind(updated.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(accounts)
    }
}
