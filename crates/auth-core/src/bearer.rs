//! Bearer authorization header parsing

use crate::error::{AuthError, Result};

/// Extract the token from a `Bearer <token>` authorization value.
///
/// The header must consist of exactly two whitespace-separated fields
/// with the literal scheme `Bearer`. Parsing happens before any token
/// verification is attempted.
pub fn parse_bearer(header: &str) -> Result<&str> {
    let mut fields = header.split_whitespace();

    match (fields.next(), fields.next(), fields.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedHeader(
            "invalid authorization header".to_string(),
        )),
    }
}
