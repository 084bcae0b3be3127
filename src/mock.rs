//! Test double for code that depends on [`TokenCreator`] / [`TokenParser`].

use crate::codec::{self, AlgorithmPolicy, ClaimsSet, VerifiedToken};
use crate::error::{SecretError, TokenError};
use crate::extract;
use crate::secret::SigningSecret;
use crate::service::{TokenCreator, TokenParser};
use http::Request;

/// In-memory token service with an injectable secret and failure.
///
/// Signs and verifies for real with whatever secret is set, but never
/// reads the environment.
#[derive(Debug, Default)]
pub struct MockTokenService {
    /// Raw secret; empty means unresolved
    pub secret: Vec<u8>,
    /// When set, `create_token` fails with this message
    pub fail_with: Option<String>,
    /// Last claims passed to `create_token`
    pub claims: ClaimsSet,
    /// Last token produced, empty after a failure
    pub token_string: String,
    /// Last resolution error
    pub error: Option<SecretError>,
    /// Number of `create_token` calls
    pub create_calls: usize,
}

impl MockTokenService {
    /// Mock with the given secret.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Make `create_token` fail.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    fn signing_secret(&self) -> Result<SigningSecret, TokenError> {
        SigningSecret::new(self.secret.clone()).map_err(TokenError::from)
    }
}

impl TokenCreator for MockTokenService {
    fn resolve_secret(&mut self) -> Result<(), SecretError> {
        if self.secret.is_empty() {
            let err = SecretError::missing("mock");
            self.token_string.clear();
            self.error = Some(err.clone());
            return Err(err);
        }
        self.error = None;
        Ok(())
    }

    fn create_token(&mut self, claims: ClaimsSet) -> Result<String, TokenError> {
        self.create_calls += 1;
        self.claims = claims;

        if let Some(message) = &self.fail_with {
            self.token_string.clear();
            return Err(TokenError::Internal(message.clone()));
        }

        match self.signing_secret().and_then(|secret| codec::sign(&self.claims, &secret)) {
            Ok(token) => {
                self.token_string.clone_from(&token);
                Ok(token)
            }
            Err(e) => {
                self.token_string.clear();
                Err(e)
            }
        }
    }
}

impl TokenParser for MockTokenService {
    fn parse_token(&mut self, token: &str) -> Result<VerifiedToken, TokenError> {
        codec::verify(token, &self.signing_secret()?, AlgorithmPolicy::Hs256Only, 0)
    }

    fn parse_token_from_request<B>(&mut self, request: &Request<B>) -> Result<VerifiedToken, TokenError> {
        let token = extract::bearer_token(request.headers())?;
        codec::verify(token, &self.signing_secret()?, AlgorithmPolicy::HmacFamily, 0)
    }
}
