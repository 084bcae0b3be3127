//! Token service: secret resolution, issuance and verification.
//!
//! A [`JwtTokenService`] owns its secret and a diagnostic [`Snapshot`] of
//! the most recent call. Every operation takes `&mut self`; share an
//! instance across threads only behind external synchronization, or build
//! one per call site.

use crate::codec::{self, AlgorithmPolicy, ClaimsSet, VerifiedToken};
use crate::config::Config;
use crate::error::{SecretError, TokenError};
use crate::extract;
use crate::secret::{EnvSecretProvider, SecretProvider, SigningSecret, StaticSecretProvider};
use http::Request;
use tracing::{debug, warn};

/// Issues tokens.
pub trait TokenCreator {
    /// Resolve the signing secret from the instance's provider.
    ///
    /// # Errors
    ///
    /// Returns `MissingSecret` when the secret is unset or empty.
    fn resolve_secret(&mut self) -> Result<(), SecretError>;

    /// Sign `claims` with HS256.
    ///
    /// # Errors
    ///
    /// Returns `MissingSecret` if no secret is resolved, or `Signing` on
    /// codec failure.
    fn create_token(&mut self, claims: ClaimsSet) -> Result<String, TokenError>;
}

/// Verifies tokens.
pub trait TokenParser {
    /// Verify a raw token string. Only HS256 is accepted.
    ///
    /// # Errors
    ///
    /// `UnexpectedSigningMethod` for any other algorithm, otherwise the
    /// codec error.
    fn parse_token(&mut self, token: &str) -> Result<VerifiedToken, TokenError>;

    /// Verify the bearer token carried by `request`.
    ///
    /// # Errors
    ///
    /// `TokenMissing` without a bearer header, `UnexpectedSigningMethod`
    /// when the request policy rejects the algorithm, otherwise the codec
    /// error.
    fn parse_token_from_request<B>(&mut self, request: &Request<B>) -> Result<VerifiedToken, TokenError>;
}

/// State left behind by the most recent call.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Claims of the last created or parsed token
    pub claims: ClaimsSet,
    /// Last created or parsed token string, empty after a failure
    pub token_string: String,
    /// Last secret resolution error
    pub error: Option<SecretError>,
}

/// HS256 token service.
#[derive(Debug)]
pub struct JwtTokenService<P = EnvSecretProvider> {
    provider: P,
    secret: Option<SigningSecret>,
    leeway: u64,
    request_policy: AlgorithmPolicy,
    snapshot: Snapshot,
}

impl JwtTokenService<EnvSecretProvider> {
    /// Service reading its secret from the variable named in `config`.
    /// Call [`TokenCreator::resolve_secret`] before use.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_provider(EnvSecretProvider::with_var(&config.secret_var), config)
    }
}

impl JwtTokenService<StaticSecretProvider> {
    /// Service with an injected secret, already resolved.
    #[must_use]
    pub fn with_secret(secret: SigningSecret, config: &Config) -> Self {
        let mut service = Self::with_provider(StaticSecretProvider::new(secret.clone()), config);
        service.secret = Some(secret);
        service
    }
}

impl<P: SecretProvider> JwtTokenService<P> {
    /// Service over an arbitrary secret provider.
    #[must_use]
    pub fn with_provider(provider: P, config: &Config) -> Self {
        Self {
            provider,
            secret: None,
            leeway: config.leeway_secs,
            request_policy: config.request_policy,
            snapshot: Snapshot::default(),
        }
    }

    /// Whether a secret is currently resolved.
    #[must_use]
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Diagnostic state of the most recent call.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Algorithms accepted by [`TokenParser::parse_token_from_request`].
    #[must_use]
    pub fn request_policy(&self) -> AlgorithmPolicy {
        self.request_policy
    }

    fn secret(&self) -> Result<&SigningSecret, TokenError> {
        self.secret.as_ref().ok_or(TokenError::MissingSecret)
    }

    fn verify(&mut self, token: &str, policy: AlgorithmPolicy) -> Result<VerifiedToken, TokenError> {
        let result = codec::verify(token, self.secret()?, policy, self.leeway);
        match &result {
            Ok(verified) => {
                debug!(alg = ?verified.algorithm, claims = verified.claims.len(), "token verified");
                self.snapshot.claims = verified.claims.clone();
                self.snapshot.token_string = verified.raw.clone();
            }
            Err(e) => debug!(code = e.code().as_str(), error = %e, "token rejected"),
        }
        result
    }
}

impl<P: SecretProvider> TokenCreator for JwtTokenService<P> {
    fn resolve_secret(&mut self) -> Result<(), SecretError> {
        match self.provider.resolve() {
            Ok(secret) => {
                self.secret = Some(secret);
                self.snapshot.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "signing secret unavailable");
                self.secret = None;
                self.snapshot.token_string.clear();
                self.snapshot.error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn create_token(&mut self, claims: ClaimsSet) -> Result<String, TokenError> {
        let result = self.secret().and_then(|secret| codec::sign(&claims, secret));
        self.snapshot.claims = claims;

        match result {
            Ok(token) => {
                debug!(claims = self.snapshot.claims.len(), "token created");
                self.snapshot.token_string.clone_from(&token);
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, "token creation failed");
                self.snapshot.token_string.clear();
                Err(e)
            }
        }
    }
}

impl<P: SecretProvider> TokenParser for JwtTokenService<P> {
    fn parse_token(&mut self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify(token, AlgorithmPolicy::Hs256Only)
    }

    fn parse_token_from_request<B>(&mut self, request: &Request<B>) -> Result<VerifiedToken, TokenError> {
        let token = extract::bearer_token(request.headers())?;
        let policy = self.request_policy;
        self.verify(token, policy)
    }
}
