//! Error types for the account directory

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An account with the given username or email already exists.
    #[error("account already exists: {0}")]
    AlreadyExists(String),

    /// No account matched the lookup key.
    #[error("account not found: {0}")]
    NotFound(String),

    /// Underlying storage failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or hash parsing failure.
    #[error("password hash error: {0}")]
    Hash(String),
}

pub type Result<T> = std::result::Result<T, Error>;
