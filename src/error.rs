//! Error types for secret resolution and token operations.
//!
//! Codec failures (bad signature, malformed input, expired claims) are
//! passed through unmodified inside [`TokenError::Codec`]; callers that
//! need to branch on them use [`TokenError::codec_kind`] or the helper
//! predicates.

use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Secret resolution failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// The secret variable is unset or empty.
    #[error("JWT secret cannot be an empty string ({var} is unset or empty)")]
    MissingSecret {
        /// Name of the environment variable that was read
        var: String,
    },
}

impl SecretError {
    /// Create a missing secret error for the given variable.
    #[must_use]
    pub fn missing(var: impl Into<String>) -> Self {
        Self::MissingSecret { var: var.into() }
    }
}

/// Token creation and verification errors.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TokenError {
    /// No secret has been resolved on this instance.
    #[error("JWT secret has not been resolved")]
    MissingSecret,

    /// The token header declares an algorithm this entry point rejects.
    #[error("Unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),

    /// The request carried no bearer token.
    #[error("no token present in request")]
    TokenMissing,

    /// The codec failed to produce a signature.
    #[error("JWT signing error: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Verification failure reported by the codec.
    #[error(transparent)]
    Codec(#[from] jsonwebtoken::errors::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TokenError {
    /// Create a configuration error with the given message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The codec error kind, when this error came from the codec.
    #[must_use]
    pub fn codec_kind(&self) -> Option<&ErrorKind> {
        match self {
            Self::Codec(e) | Self::Signing(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// True when the signature did not verify against the secret.
    #[must_use]
    pub fn is_signature_invalid(&self) -> bool {
        matches!(self.codec_kind(), Some(ErrorKind::InvalidSignature))
    }

    /// True when the `exp` claim is in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self.codec_kind(), Some(ErrorKind::ExpiredSignature))
    }

    /// Stable code for rejection responses.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingSecret => ErrorCode::SecretMissing,
            Self::UnexpectedSigningMethod(_) => ErrorCode::UnexpectedAlgorithm,
            Self::TokenMissing => ErrorCode::TokenMissing,
            Self::Signing(_) => ErrorCode::SigningFailed,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Internal(_) => ErrorCode::Internal,
            Self::Codec(e) => match e.kind() {
                ErrorKind::InvalidSignature => ErrorCode::TokenInvalid,
                ErrorKind::ExpiredSignature => ErrorCode::TokenExpired,
                ErrorKind::ImmatureSignature => ErrorCode::TokenNotYetValid,
                _ => ErrorCode::TokenMalformed,
            },
        }
    }
}

impl From<SecretError> for TokenError {
    fn from(_: SecretError) -> Self {
        TokenError::MissingSecret
    }
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Signing secret unavailable
    SecretMissing,
    /// Algorithm rejected by the verification policy
    UnexpectedAlgorithm,
    /// No bearer token in the request
    TokenMissing,
    /// Signature mismatch
    TokenInvalid,
    /// `exp` in the past
    TokenExpired,
    /// `nbf` in the future
    TokenNotYetValid,
    /// Any other decoding failure
    TokenMalformed,
    /// Codec could not sign
    SigningFailed,
    /// Bad configuration
    ConfigInvalid,
    /// Anything else
    Internal,
}

impl ErrorCode {
    /// String form of the code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SecretMissing => "JWT_SECRET_MISSING",
            Self::UnexpectedAlgorithm => "JWT_UNEXPECTED_ALGORITHM",
            Self::TokenMissing => "JWT_TOKEN_MISSING",
            Self::TokenInvalid => "JWT_TOKEN_INVALID",
            Self::TokenExpired => "JWT_TOKEN_EXPIRED",
            Self::TokenNotYetValid => "JWT_TOKEN_NOT_YET_VALID",
            Self::TokenMalformed => "JWT_TOKEN_MALFORMED",
            Self::SigningFailed => "JWT_SIGNING_FAILED",
            Self::ConfigInvalid => "JWT_CONFIG_INVALID",
            Self::Internal => "JWT_INTERNAL",
        }
    }
}
