use std::time::Duration;

use ircgate_bridge::usecase::token::{TokenError, issue, validate};

use crate::helpers::{TEST_ISSUER, TEST_JWT_SECRET};

#[tokio::test]
async fn should_validate_freshly_issued_token() {
    let token = issue("alice", TEST_ISSUER, TEST_JWT_SECRET, 3600).unwrap();

    let claims = validate(&token, TEST_JWT_SECRET, Some(TEST_ISSUER)).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.iss, TEST_ISSUER);
    assert_eq!(claims.exp, claims.iat + 3600);
}

#[tokio::test]
async fn should_validate_without_issuer_expectation() {
    let token = issue("alice", "some-other-issuer", TEST_JWT_SECRET, 3600).unwrap();
    let claims = validate(&token, TEST_JWT_SECRET, None).unwrap();
    assert_eq!(claims.sub, "alice");
}

#[tokio::test]
async fn should_reject_token_signed_with_wrong_key() {
    let token = issue("alice", TEST_ISSUER, TEST_JWT_SECRET, 3600).unwrap();

    let result = validate(&token, "wrong-secret", Some(TEST_ISSUER));
    assert!(
        matches!(result, Err(TokenError::SignatureMismatch)),
        "expected SignatureMismatch, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_garbage_as_malformed() {
    let result = validate("not-a-jwt", TEST_JWT_SECRET, Some(TEST_ISSUER));
    assert!(
        matches!(result, Err(TokenError::Malformed)),
        "expected Malformed, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_token_after_ttl_elapsed() {
    let token = issue("alice", TEST_ISSUER, TEST_JWT_SECRET, 0).unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let result = validate(&token, TEST_JWT_SECRET, Some(TEST_ISSUER));
    assert!(
        matches!(result, Err(TokenError::Expired)),
        "expected Expired, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unexpected_issuer() {
    let token = issue("alice", "somebody-else", TEST_JWT_SECRET, 3600).unwrap();

    let result = validate(&token, TEST_JWT_SECRET, Some(TEST_ISSUER));
    assert!(
        matches!(result, Err(TokenError::IssuerMismatch)),
        "expected IssuerMismatch, got {result:?}"
    );
}
