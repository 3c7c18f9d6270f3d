use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use serde_json::{Value, json};
use subtle::ConstantTimeEq;

use crate::error::BridgeError;
use crate::state::AppState;
use crate::usecase::bridge_login::{BridgeLoginInput, BridgeLoginUseCase};

/// Shared-secret header presented by the IRC services daemon.
pub const BRIDGE_KEY_HEADER: &str = "x-bridge-key";

#[derive(Deserialize)]
pub struct BridgeLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /bridge/login`.
///
/// Always responds HTTP 200: the daemon-side client treats any non-200 as a
/// transport failure and parses the JSON body for success/failure. Do not
/// "fix" this to standard status codes — it is the documented contract.
pub async fn bridge_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(body): Form<BridgeLoginRequest>,
) -> (StatusCode, Json<Value>) {
    if let Some(expected) = &state.bridge_api_key {
        if !shared_key_matches(&headers, expected) {
            return (StatusCode::OK, failure_body(BridgeError::Unauthorized));
        }
    }

    let usecase = BridgeLoginUseCase {
        users: state.user_store(),
        app_passwords: state.app_password_store(),
        jwt_secret: state.jwt_secret.clone(),
        jwt_issuer: state.jwt_issuer.clone(),
        jwt_ttl_secs: state.jwt_ttl_secs,
        app_password_ttl_secs: state.app_password_ttl_secs,
        scram_iterations: state.scram_iterations,
        scram_salt_len: state.scram_salt_len,
    };

    let result = usecase
        .execute(BridgeLoginInput {
            username: body.username,
            password: body.password,
        })
        .await;

    match result {
        Ok(out) => (
            StatusCode::OK,
            Json(json!({
                "access_token": out.access_token,
                "email": out.email,
                "scram_sha512_verifier": out.scram_sha512_verifier,
                "scram_sha256_verifier": out.scram_sha256_verifier,
            })),
        ),
        Err(e) => (StatusCode::OK, failure_body(e)),
    }
}

fn shared_key_matches(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(BRIDGE_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|presented| bool::from(presented.as_bytes().ct_eq(expected.as_bytes())))
}

/// Collapse every failure into a caller-safe `{"error"}` body. Internal and
/// store failures keep their context in the server-side log only.
fn failure_body(err: BridgeError) -> Json<Value> {
    match &err {
        BridgeError::Internal(e) => {
            tracing::error!(error = %e, "bridge login internal error");
        }
        BridgeError::StoreUnavailable => {
            tracing::error!("bridge login store unavailable");
        }
        _ => {}
    }
    let message = match err {
        BridgeError::MissingFields => "Missing username or password",
        BridgeError::Unauthorized => "Unauthorized",
        BridgeError::InvalidCredentials => "Invalid credentials",
        BridgeError::StoreUnavailable | BridgeError::Internal(_) => "Service unavailable",
    };
    Json(json!({ "error": message }))
}
