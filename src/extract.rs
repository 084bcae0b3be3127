//! Bearer token extraction from HTTP requests.

use crate::error::TokenError;
use http::header::AUTHORIZATION;
use http::HeaderMap;

const BEARER_SCHEME: &str = "bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Any other placement of the
/// token is not supported.
///
/// # Errors
///
/// Returns `TokenMissing` if the header is absent, not valid ASCII, uses
/// another scheme, or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(TokenError::TokenMissing)?;

    if value.len() <= BEARER_SCHEME.len()
        || !value.is_char_boundary(BEARER_SCHEME.len())
        || !value[..BEARER_SCHEME.len()].eq_ignore_ascii_case(BEARER_SCHEME)
    {
        return Err(TokenError::TokenMissing);
    }

    let token = value[BEARER_SCHEME.len()..].trim();
    if token.is_empty() {
        return Err(TokenError::TokenMissing);
    }
    Ok(token)
}
