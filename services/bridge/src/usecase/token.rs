use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::BridgeError;

/// Claims carried by a signed identity assertion.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Validation failures, ordered from "not even a token" to "wrong window".
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("token expired")]
    Expired,
    #[error("issuer mismatch")]
    IssuerMismatch,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Mint an HMAC-SHA256 signed assertion binding `subject` to a validity
/// window of `ttl_secs` from now.
pub fn issue(
    subject: &str,
    issuer: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, BridgeError> {
    let iat = now_secs();
    let claims = Claims {
        iss: issuer.to_owned(),
        sub: subject.to_owned(),
        iat,
        exp: iat + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BridgeError::Internal(e.into()))
}

/// Validate a token's signature and expiry, and its issuer when one is
/// expected. Zero leeway: a token is expired the second `exp` passes.
pub fn validate(
    token: &str,
    secret: &str,
    expected_issuer: Option<&str>,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    if let Some(issuer) = expected_issuer {
        validation.set_issuer(&[issuer]);
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => TokenError::IssuerMismatch,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}
