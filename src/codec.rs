//! Stateless HS256 signing and policy-checked verification.
//!
//! These functions hold no state and may be called concurrently. The
//! service layer wraps them with secret resolution and a diagnostic
//! snapshot.

use crate::error::TokenError;
use crate::secret::SigningSecret;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde_json::{Map, Value};

/// Upper bound on clock skew tolerance, in seconds.
pub const MAX_LEEWAY_SECS: u64 = 86_400;

/// Token payload: arbitrary JSON claims.
pub type ClaimsSet = Map<String, Value>;

/// Which header algorithms a verification entry point accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmPolicy {
    /// Exactly HS256.
    #[default]
    Hs256Only,
    /// HS256, HS384 or HS512.
    HmacFamily,
}

impl AlgorithmPolicy {
    /// Parse a policy name (`hs256` or `hmac`).
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown names.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        match s.to_lowercase().as_str() {
            "hs256" | "strict" => Ok(Self::Hs256Only),
            "hmac" => Ok(Self::HmacFamily),
            _ => Err(TokenError::config(format!("Invalid algorithm policy: {s}"))),
        }
    }

    /// Whether `alg` passes this policy.
    #[must_use]
    pub const fn accepts(&self, alg: Algorithm) -> bool {
        match self {
            Self::Hs256Only => matches!(alg, Algorithm::HS256),
            Self::HmacFamily => matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512),
        }
    }
}

/// Result of a successful verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedToken {
    /// Raw compact token
    pub raw: String,
    /// Decoded header
    pub header: Header,
    /// Validated claims
    pub claims: ClaimsSet,
    /// Algorithm the token was signed with
    pub algorithm: Algorithm,
    /// Always true for a returned token
    pub valid: bool,
}

/// Name of an algorithm as it appears in the `alg` header.
#[must_use]
pub fn algorithm_name(alg: Algorithm) -> String {
    format!("{alg:?}")
}

/// Sign `claims` with HS256.
///
/// # Errors
///
/// Returns `Signing` if the codec cannot produce the token.
pub fn sign(claims: &ClaimsSet, secret: &SigningSecret) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    encode(&header, claims, &EncodingKey::from_secret(secret.expose())).map_err(TokenError::Signing)
}

/// Verify `token` against `secret`, enforcing `policy` on the header algorithm.
///
/// The algorithm check runs before any signature work. `exp` and `nbf` are
/// validated when present; no claim is required. `leeway` is capped at
/// [`MAX_LEEWAY_SECS`].
///
/// # Errors
///
/// `UnexpectedSigningMethod` when the policy rejects the header algorithm,
/// otherwise the codec error unmodified.
pub fn verify(
    token: &str,
    secret: &SigningSecret,
    policy: AlgorithmPolicy,
    leeway: u64,
) -> Result<VerifiedToken, TokenError> {
    let header = decode_header(token)?;
    if !policy.accepts(header.alg) {
        return Err(TokenError::UnexpectedSigningMethod(algorithm_name(header.alg)));
    }

    let mut validation = Validation::new(header.alg);
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.validate_aud = false;
    validation.leeway = leeway.min(MAX_LEEWAY_SECS);

    let data = decode::<ClaimsSet>(token, &DecodingKey::from_secret(secret.expose()), &validation)?;

    Ok(VerifiedToken {
        raw: token.to_string(),
        algorithm: data.header.alg,
        header: data.header,
        claims: data.claims,
        valid: true,
    })
}
