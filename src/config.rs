//! Service configuration.
//!
//! Loaded from environment variables (and a `.env` file when present).
//! The signing secret itself is not part of the configuration; only the
//! name of the variable it is read from.

use crate::codec::{AlgorithmPolicy, MAX_LEEWAY_SECS};
use crate::error::TokenError;
use crate::observability::TracingConfig;
use crate::secret::DEFAULT_SECRET_VAR;
use std::env;

/// Token service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment variable holding the signing secret
    pub secret_var: String,
    /// Clock skew tolerance for `exp`/`nbf`, in seconds
    pub leeway_secs: u64,
    /// Algorithms accepted by request-based parsing
    pub request_policy: AlgorithmPolicy,
    /// Logging settings
    pub tracing: TracingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_var: DEFAULT_SECRET_VAR.to_string(),
            leeway_secs: 0,
            request_policy: AlgorithmPolicy::HmacFamily,
            tracing: TracingConfig::default().with_service_name("jwt-token"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid, including a
    /// `JWT_LEEWAY` above [`MAX_LEEWAY_SECS`].
    pub fn from_env() -> Result<Self, TokenError> {
        dotenvy::dotenv().ok();

        let secret_var =
            env::var("JWT_SECRET_VAR").unwrap_or_else(|_| DEFAULT_SECRET_VAR.to_string());
        let leeway_secs = parse_env("JWT_LEEWAY", 0)?;
        if leeway_secs > MAX_LEEWAY_SECS {
            return Err(TokenError::config(format!(
                "JWT_LEEWAY must be at most {MAX_LEEWAY_SECS} seconds, got {leeway_secs}"
            )));
        }
        let request_policy = AlgorithmPolicy::parse(
            &env::var("JWT_REQUEST_ALGORITHMS").unwrap_or_else(|_| "hmac".to_string()),
        )?;

        let mut tracing = TracingConfig::default()
            .with_service_name("jwt-token")
            .with_log_level(env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
        if parse_env("LOG_JSON", false)? {
            tracing = tracing.with_json_output();
        }

        Ok(Self {
            secret_var,
            leeway_secs,
            request_policy,
            tracing,
        })
    }

    /// Override the request parsing policy.
    #[must_use]
    pub fn with_request_policy(mut self, policy: AlgorithmPolicy) -> Self {
        self.request_policy = policy;
        self
    }

    /// Override the leeway, capped at [`MAX_LEEWAY_SECS`].
    #[must_use]
    pub const fn with_leeway(mut self, secs: u64) -> Self {
        self.leeway_secs = if secs > MAX_LEEWAY_SECS { MAX_LEEWAY_SECS } else { secs };
        self
    }
}

/// Parse environment variable with default value.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, TokenError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| TokenError::config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
