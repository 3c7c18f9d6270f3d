use ircgate_bridge::error::BridgeError;
use ircgate_bridge::usecase::app_password::GenerateAppPasswordUseCase;
use ircgate_bridge::usecase::bridge_login::BridgeLoginInput;
use ircgate_bridge::usecase::token::validate;

use crate::helpers::{
    MockAppPasswordStore, MockUserStore, TEST_ISSUER, TEST_JWT_SECRET, login_usecase, test_user,
};

fn input(username: &str, password: &str) -> BridgeLoginInput {
    BridgeLoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

fn verifier_is_well_formed(verifier: &str) {
    let fields: Vec<&str> = verifier.split(',').collect();
    assert_eq!(fields.len(), 5, "unexpected verifier {verifier}");
    assert_eq!(fields[0], "v=1");
    assert!(fields[1].starts_with("i="));
    assert!(fields[2].starts_with("s="));
    assert!(fields[3].starts_with("sk="));
    assert!(fields[4].starts_with("sv="));
}

#[tokio::test]
async fn should_login_with_primary_password_and_return_assertion_plus_verifiers() {
    let alice = test_user("alice");
    let users = MockUserStore::new(vec![(alice.clone(), "correct horse")]);
    let usecase = login_usecase(users, MockAppPasswordStore::new());

    let out = usecase.execute(input("alice", "correct horse")).await.unwrap();

    let claims = validate(&out.access_token, TEST_JWT_SECRET, Some(TEST_ISSUER)).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(out.email, alice.email);
    verifier_is_well_formed(&out.scram_sha512_verifier);
    verifier_is_well_formed(&out.scram_sha256_verifier);
}

#[tokio::test]
async fn should_match_username_case_insensitively_but_assert_canonical_name() {
    let alice = test_user("alice");
    let users = MockUserStore::new(vec![(alice, "correct horse")]);
    let usecase = login_usecase(users, MockAppPasswordStore::new());

    let out = usecase.execute(input("ALICE", "correct horse")).await.unwrap();

    let claims = validate(&out.access_token, TEST_JWT_SECRET, Some(TEST_ISSUER)).unwrap();
    assert_eq!(claims.sub, "alice");
}

#[tokio::test]
async fn should_reject_missing_fields() {
    let usecase = login_usecase(MockUserStore::empty(), MockAppPasswordStore::new());

    for (username, password) in [("", "pw"), ("alice", ""), ("   ", "pw")] {
        let result = usecase.execute(input(username, password)).await;
        assert!(
            matches!(result, Err(BridgeError::MissingFields)),
            "expected MissingFields for {username:?}/{password:?}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let alice = test_user("alice");
    let users = MockUserStore::new(vec![(alice, "correct horse")]);
    let usecase = login_usecase(users, MockAppPasswordStore::new());

    let wrong_password = usecase.execute(input("alice", "nope")).await;
    let unknown_user = usecase.execute(input("mallory", "nope")).await;

    // No enumeration signal: both collapse to the same variant.
    assert!(matches!(wrong_password, Err(BridgeError::InvalidCredentials)));
    assert!(matches!(unknown_user, Err(BridgeError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_unverified_email_despite_correct_password() {
    let mut bob = test_user("bob");
    bob.email_verified = false;
    let users = MockUserStore::new(vec![(bob, "hunter2")]);
    let usecase = login_usecase(users, MockAppPasswordStore::new());

    let result = usecase.execute(input("bob", "hunter2")).await;
    assert!(
        matches!(result, Err(BridgeError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_inactive_account() {
    let mut carol = test_user("carol");
    carol.is_active = false;
    let users = MockUserStore::new(vec![(carol, "hunter2")]);
    let usecase = login_usecase(users, MockAppPasswordStore::new());

    let result = usecase.execute(input("carol", "hunter2")).await;
    assert!(matches!(result, Err(BridgeError::InvalidCredentials)));
}

#[tokio::test]
async fn should_accept_one_time_app_password_as_fallback_exactly_once() {
    let alice = test_user("alice");
    let store = MockAppPasswordStore::new();
    let secret = GenerateAppPasswordUseCase {
        app_passwords: store.clone(),
    }
    .execute(alice.id)
    .await
    .unwrap();

    let users = MockUserStore::new(vec![(alice, "correct horse")]);
    let usecase = login_usecase(users, store);

    let out = usecase.execute(input("alice", &secret)).await.unwrap();
    let claims = validate(&out.access_token, TEST_JWT_SECRET, Some(TEST_ISSUER)).unwrap();
    assert_eq!(claims.sub, "alice");

    // Single use: replaying the same secret fails like any bad password.
    let replay = usecase.execute(input("alice", &secret)).await;
    assert!(matches!(replay, Err(BridgeError::InvalidCredentials)));
}
