use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Web account data the bridge needs for authentication decisions.
/// Owned by the account system; the bridge only reads it.
#[derive(Debug, Clone)]
pub struct BridgeUser {
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub email: String,
    pub is_active: bool,
    pub email_verified: bool,
}

/// One-time IRC application password. Holds only the secret's hash;
/// the plaintext exists exactly once, at generation time.
#[derive(Debug, Clone)]
pub struct AppPassword {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl AppPassword {
    /// Active means not revoked, not consumed, and younger than `ttl_secs`.
    /// Expiry is a query-time filter only; it never mutates the record.
    pub fn is_active(&self, ttl_secs: u64, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none()
            && self.last_used.is_none()
            && self.created_at >= now - Duration::seconds(ttl_secs as i64)
    }
}

/// Random bytes in a freshly generated app-password secret.
pub const APP_PASSWORD_SECRET_LEN: usize = 24;

/// Newest-first scan window for app-password consumption.
pub const APP_PASSWORD_SCAN_WINDOW: u64 = 10;

/// App-password TTL default and clamp bounds, in seconds.
pub const APP_PASSWORD_TTL_DEFAULT_SECS: u64 = 120;
pub const APP_PASSWORD_TTL_MIN_SECS: u64 = 10;
pub const APP_PASSWORD_TTL_MAX_SECS: u64 = 86_400;

/// Signed-assertion validity window default, in seconds (24h).
pub const TOKEN_TTL_DEFAULT_SECS: u64 = 86_400;
