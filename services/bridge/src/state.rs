use sea_orm::DatabaseConnection;

use crate::config::BridgeConfig;
use crate::infra::db::{DbAppPasswordStore, DbUserStore};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_ttl_secs: u64,
    pub app_password_ttl_secs: u64,
    pub scram_iterations: u32,
    pub scram_salt_len: usize,
    pub bridge_api_key: Option<String>,
}

impl AppState {
    pub fn new(config: BridgeConfig, db: DatabaseConnection) -> Self {
        Self {
            db,
            jwt_secret: config.jwt_secret,
            jwt_issuer: config.jwt_issuer,
            jwt_ttl_secs: config.jwt_ttl_secs,
            app_password_ttl_secs: config.app_password_ttl_secs,
            scram_iterations: config.scram_iterations,
            scram_salt_len: config.scram_salt_len,
            bridge_api_key: config.bridge_api_key,
        }
    }

    pub fn user_store(&self) -> DbUserStore {
        DbUserStore {
            db: self.db.clone(),
        }
    }

    pub fn app_password_store(&self) -> DbAppPasswordStore {
        DbAppPasswordStore {
            db: self.db.clone(),
        }
    }
}
