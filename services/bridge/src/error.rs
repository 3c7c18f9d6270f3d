use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Bridge service error variants.
///
/// `InvalidCredentials` deliberately covers wrong password, unknown user,
/// inactive account, and unverified email: the IRC daemon must not be able
/// to enumerate accounts through this channel.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("missing username or password")]
    MissingFields,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("store unavailable")]
    StoreUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BridgeError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

/// Standard-status rendering, used by the app-password endpoints.
/// The bridge-login handler never goes through this — it folds every
/// failure into a 200 `{"error"}` body (see `handlers::bridge_login`).
impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 5xx carry a loggable cause; 4xx are ordinary client outcomes.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::StoreUnavailable => {
                tracing::error!(kind = "STORE_UNAVAILABLE", "store unavailable");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
