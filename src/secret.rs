//! Signing secret and its providers.
//!
//! The secret is resolved explicitly through a [`SecretProvider`]. The
//! environment provider re-reads its variable on every call so the result
//! always reflects the current process environment.

use crate::error::SecretError;
use std::env;
use std::fmt;
use zeroize::Zeroizing;

/// Default environment variable holding the signing secret.
pub const DEFAULT_SECRET_VAR: &str = "JWT_SECRET";

/// Non-empty HMAC key material, zeroized on drop.
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    /// Wrap secret bytes. Empty input is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `MissingSecret` if `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SecretError::missing("<inline>"));
        }
        Ok(Self(Zeroizing::new(bytes)))
    }

    /// Raw key bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}

/// Source of the signing secret.
pub trait SecretProvider {
    /// Resolve the secret.
    ///
    /// # Errors
    ///
    /// Returns `MissingSecret` when no usable secret is available.
    fn resolve(&self) -> Result<SigningSecret, SecretError>;
}

/// Reads the secret from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    /// Provider reading `JWT_SECRET`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_var(DEFAULT_SECRET_VAR)
    }

    /// Provider reading a custom variable.
    #[must_use]
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable this provider reads.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn resolve(&self) -> Result<SigningSecret, SecretError> {
        match env::var(&self.var) {
            Ok(value) if !value.is_empty() => SigningSecret::new(value.into_bytes())
                .map_err(|_| SecretError::missing(&self.var)),
            _ => Err(SecretError::missing(&self.var)),
        }
    }
}

/// Always yields the same injected secret.
#[derive(Debug, Clone)]
pub struct StaticSecretProvider {
    secret: SigningSecret,
}

impl StaticSecretProvider {
    /// Wrap an already validated secret.
    #[must_use]
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }
}

impl SecretProvider for StaticSecretProvider {
    fn resolve(&self) -> Result<SigningSecret, SecretError> {
        Ok(self.secret.clone())
    }
}
