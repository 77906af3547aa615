//! Error types for authentication and authorization operations

use thiserror::Error;

/// Unified error taxonomy for the auth surface.
///
/// Every component returns one of these; only the orchestrator and the
/// enforcement point translate them into the `{code, message}` shape
/// returned to callers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identity or resource absent. A business outcome, not a fault.
    #[error("{0}")]
    NotFound(String),

    /// Supplied secret did not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Malformed token, bad signature or unsupported algorithm.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token signature was valid but the token has expired.
    #[error("token expired")]
    TokenExpired,

    /// Authorization header missing or not of the form `Bearer <token>`.
    #[error("{0}")]
    MalformedHeader(String),

    /// Registration conflict.
    #[error("{0}")]
    AlreadyExists(String),

    /// Downstream verification provider failed; its own classification
    /// is preserved.
    #[error("{message}")]
    Provider { code: u16, message: String },

    /// Account directory failure (storage layer fault, not a miss).
    #[error("directory error: {0}")]
    Directory(String),

    /// Caller's role is not in the allowed set for the invoked method.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Signing or hashing failure, unexpected state.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Transport-independent status code for this error.
    ///
    /// An HTTP-bridging gateway maps these one-to-one onto HTTP status
    /// codes; the values are chosen so that mapping is the identity.
    pub fn code(&self) -> u16 {
        match self {
            AuthError::NotFound(_) => 404,
            AuthError::InvalidCredentials => 400,
            AuthError::MalformedHeader(_) => 400,
            AuthError::InvalidToken(_) => 401,
            AuthError::TokenExpired => 401,
            AuthError::AlreadyExists(_) => 409,
            AuthError::Provider { code, .. } => *code,
            AuthError::Directory(_) => 500,
            AuthError::PermissionDenied(_) => 403,
            AuthError::Config(_) => 500,
            AuthError::Internal(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
