//! Token issuance and validation.
//!
//! Tokens are HS256-signed JWTs whose claims bind the bearer to a single account number. The signing
//! secret comes from [`AuthConfig`](crate::config::AuthConfig) exactly once, when the issuer is built;
//! nothing in this module touches the environment.

use chrono::Duration;
use jwt_compact::{
    alg::{Hs256, Hs256Key},
    AlgorithmExt,
    Claims,
    Header,
    TimeOptions,
    Token,
    UntrustedToken,
};
use serde::{Deserialize, Serialize};

use crate::{config::AuthConfig, errors::AuthError};

/// The request header carrying the access token on protected routes. There is no cookie or query
/// parameter fallback.
pub const AUTH_TOKEN_HEADER: &str = "x-jwt-token";

const DEFAULT_TOKEN_VALIDITY: Duration = Duration::hours(24);

/// The claim set carried by every access token. The account number is the authorization subject; the
/// expiry lives in the standard `exp` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
}

/// Issues and validates access tokens with a key fixed at construction time.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Hs256Key,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = Hs256Key::new(config.jwt_secret.reveal().as_bytes());
        Self { key }
    }

    /// Issue a signed access token bound to the given account number.
    ///
    /// The token is valid for 24 hours unless a duration is given. Possession of the token stands in
    /// for knowledge of the account number on the protected routes, so issue it only to the caller who
    /// just created the account.
    pub fn issue_token(&self, account_number: i64, duration: Option<Duration>) -> Result<String, AuthError> {
        let claims = Claims::new(JwtClaims { account_number })
            .set_duration_and_issuance(&TimeOptions::default(), duration.unwrap_or(DEFAULT_TOKEN_VALIDITY));
        let header = Header::empty().with_token_type("JWT");
        Hs256.token(&header, &claims, &self.key).map_err(|e| AuthError::SigningError(e.to_string()))
    }

    /// Validate a token string and return its claims.
    ///
    /// A token passes only if it parses as a JWT, carries the expected algorithm, verifies against the
    /// signing secret, and has not expired. Validation is stateless; nothing is cached between calls.
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let untrusted = UntrustedToken::new(token).map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
        let token: Token<JwtClaims> =
            Hs256.validator(&self.key).validate(&untrusted).map_err(|e| AuthError::ValidationError(e.to_string()))?;
        token
            .claims()
            .validate_expiration(&TimeOptions::default())
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        Ok(token.claims().custom.clone())
    }
}
