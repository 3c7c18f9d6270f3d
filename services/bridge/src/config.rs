use std::str::FromStr;

use crate::domain::types::{
    APP_PASSWORD_TTL_DEFAULT_SECS, APP_PASSWORD_TTL_MAX_SECS, APP_PASSWORD_TTL_MIN_SECS,
    TOKEN_TTL_DEFAULT_SECS,
};
use crate::scram::{MIN_ITERATIONS, MIN_SALT_LEN};

/// Bridge service configuration loaded from environment variables.
/// Passed explicitly at construction; no ambient global settings.
#[derive(Debug)]
pub struct BridgeConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing identity assertions.
    pub jwt_secret: String,
    /// `iss` claim stamped into and required from every token.
    pub jwt_issuer: String,
    /// Assertion validity window (default 24h). Env var: `JWT_TTL_SECS`.
    pub jwt_ttl_secs: u64,
    /// One-time app-password TTL, clamped to [10s, 86400s].
    /// Env var: `APP_PASSWORD_TTL_SECS`.
    pub app_password_ttl_secs: u64,
    /// SCRAM PBKDF2 iteration count (floor 4096). Env var: `SCRAM_ITERATIONS`.
    pub scram_iterations: u32,
    /// SCRAM salt length in bytes (floor 16). Env var: `SCRAM_SALT_LEN`.
    pub scram_salt_len: usize,
    /// Optional static shared secret the IRC daemon must present in the
    /// `x-bridge-key` header. Env var: `BRIDGE_API_KEY`.
    pub bridge_api_key: Option<String>,
    /// TCP port to listen on (default 3120). Env var: `BRIDGE_PORT`.
    pub bridge_port: u16,
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            jwt_issuer: std::env::var("JWT_ISSUER").expect("JWT_ISSUER"),
            jwt_ttl_secs: env_or("JWT_TTL_SECS", TOKEN_TTL_DEFAULT_SECS),
            app_password_ttl_secs: clamp_app_password_ttl(env_or(
                "APP_PASSWORD_TTL_SECS",
                APP_PASSWORD_TTL_DEFAULT_SECS,
            )),
            scram_iterations: env_or("SCRAM_ITERATIONS", MIN_ITERATIONS).max(MIN_ITERATIONS),
            scram_salt_len: env_or("SCRAM_SALT_LEN", MIN_SALT_LEN).max(MIN_SALT_LEN),
            bridge_api_key: std::env::var("BRIDGE_API_KEY").ok(),
            bridge_port: env_or("BRIDGE_PORT", 3120),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn clamp_app_password_ttl(secs: u64) -> u64 {
    secs.clamp(APP_PASSWORD_TTL_MIN_SECS, APP_PASSWORD_TTL_MAX_SECS)
}
