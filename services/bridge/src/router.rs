use axum::{
    Router,
    routing::{get, post},
};

use ircgate_core::health::{healthz, readyz};
use ircgate_core::middleware::{request_id_layer, trace_layer};

use crate::handlers::{
    app_password::{generate_app_password, revoke_app_password},
    bridge_login::bridge_login,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // IRC daemon login contract
        .route("/bridge/login", post(bridge_login))
        // App passwords (authenticated web session)
        .route("/bridge/app-password/generate", post(generate_app_password))
        .route("/bridge/app-password/revoke", post(revoke_app_password))
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
