#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{AppPassword, BridgeUser};
use crate::error::BridgeError;

/// Port onto the external account store. The bridge never writes users.
pub trait UserStore: Send + Sync {
    /// Case-insensitive username lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<BridgeUser>, BridgeError>;

    /// Compare `password` against the user's stored hash.
    async fn verify_password(
        &self,
        user: &BridgeUser,
        password: &str,
    ) -> Result<bool, BridgeError>;
}

/// Repository for one-time IRC application passwords.
pub trait AppPasswordStore: Send + Sync {
    /// Revoke every active record for `record.owner_id` and insert `record`,
    /// atomically. Keeps at most one active record per owner even under
    /// concurrent generation.
    async fn replace_active(&self, record: &AppPassword) -> Result<(), BridgeError>;

    /// Stamp `revoked_at = now` on every active record for `owner_id`.
    /// Returns the number of records revoked; idempotent.
    async fn revoke_active(&self, owner_id: Uuid) -> Result<u64, BridgeError>;

    /// Unrevoked, unconsumed records for `owner_id` created at or after
    /// `cutoff`, newest first, at most `limit`.
    async fn recent_candidates(
        &self,
        owner_id: Uuid,
        cutoff: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<AppPassword>, BridgeError>;

    /// Consume a record: set `last_used` and `revoked_at` in one conditional
    /// update guarded on `last_used IS NULL`. Returns `false` when another
    /// caller consumed it first.
    async fn consume(&self, id: Uuid) -> Result<bool, BridgeError>;
}
