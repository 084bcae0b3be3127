//! HS256 JSON Web Token issuance and verification.
//!
//! Provides a token service that signs arbitrary claims with a single
//! symmetric secret and verifies tokens presented as raw strings or as
//! `Authorization: Bearer` headers, rejecting any non-HMAC algorithm.
//!
//! ```no_run
//! use jwt_token::{Config, JwtTokenService, TokenCreator, TokenParser};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let mut service = JwtTokenService::new(&config);
//! service.resolve_secret()?;
//!
//! let mut claims = jwt_token::ClaimsSet::new();
//! claims.insert("sub".into(), "user-123".into());
//! let token = service.create_token(claims)?;
//! let verified = service.parse_token(&token)?;
//! assert!(verified.valid);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod extract;
pub mod mock;
pub mod observability;
pub mod secret;
pub mod service;

// Re-exports for convenience
pub use codec::{AlgorithmPolicy, ClaimsSet, VerifiedToken, MAX_LEEWAY_SECS};
pub use config::Config;
pub use error::{ErrorCode, SecretError, TokenError};
pub use secret::{EnvSecretProvider, SecretProvider, SigningSecret, StaticSecretProvider};
pub use service::{JwtTokenService, Snapshot, TokenCreator, TokenParser};
