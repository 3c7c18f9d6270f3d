use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde_json::json;

use crate::domain::repository::UserStore;
use crate::domain::types::BridgeUser;
use crate::error::BridgeError;
use crate::state::AppState;
use crate::usecase::app_password::{GenerateAppPasswordUseCase, RevokeAppPasswordUseCase};
use crate::usecase::token;

/// Resolve the web session behind a bearer access token. Any token problem
/// is a plain `Unauthorized`; these endpoints are not an enumeration oracle
/// either.
async fn require_session(
    state: &AppState,
    bearer: &Authorization<Bearer>,
) -> Result<BridgeUser, BridgeError> {
    let claims = token::validate(bearer.token(), &state.jwt_secret, Some(&state.jwt_issuer))
        .map_err(|_| BridgeError::Unauthorized)?;
    let user = state
        .user_store()
        .find_by_username(&claims.sub)
        .await?
        .ok_or(BridgeError::Unauthorized)?;
    if !user.is_active {
        return Err(BridgeError::Unauthorized);
    }
    Ok(user)
}

/// The plaintext secret appears exactly once, in this response body.
fn no_store_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

/// `POST /bridge/app-password/generate`
pub async fn generate_app_password(
    State(state): State<AppState>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, BridgeError> {
    let user = require_session(&state, &bearer).await?;

    let usecase = GenerateAppPasswordUseCase {
        app_passwords: state.app_password_store(),
    };
    let secret = usecase.execute(user.id).await?;

    Ok((
        StatusCode::OK,
        no_store_headers(),
        Json(json!({ "token": secret, "active": 1 })),
    ))
}

/// `POST /bridge/app-password/revoke`
pub async fn revoke_app_password(
    State(state): State<AppState>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, BridgeError> {
    let user = require_session(&state, &bearer).await?;

    let usecase = RevokeAppPasswordUseCase {
        app_passwords: state.app_password_store(),
    };
    usecase.execute(user.id).await?;

    Ok(Json(json!({ "revoked": true, "active": 0 })))
}
