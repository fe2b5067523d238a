//! Unverified decoding of the session token's claims.
//!
//! The token is issued and signed by the server; the client only peeks at the
//! payload segment to prefill forms and to notice expiry early. The signature
//! is never checked here and must not be trusted for access control.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json: {0}")]
    Json(String),
}

/// Subject fields embedded in the session token.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Claims {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Expiry in seconds since the epoch.
    pub exp: Option<f64>,
}

impl Claims {
    /// A token without `exp` counts as expired.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_expired(&self, now_millis: i64) -> bool {
        match self.exp {
            Some(exp) => exp * 1000.0 <= now_millis as f64,
            None => true,
        }
    }
}

/// Decodes the payload segment of a `header.payload.signature` token.
///
/// # Errors
/// Returns an error if the payload segment is missing, not base64url, or not a
/// JSON object with the expected field types.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = token
        .trim()
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::TokenFormat)?;

    // Accept padded and standard-alphabet payloads as well.
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = Base64UrlUnpadded::decode_vec(&normalized).map_err(|_| TokenError::Base64)?;
    serde_json::from_slice(&bytes).map_err(|err| TokenError::Json(err.to_string()))
}

/// Milliseconds since the epoch.
#[must_use]
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
