use anyhow::Context as _;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::Argon2;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngExt;
use tokio::task;
use uuid::Uuid;

use crate::domain::repository::AppPasswordStore;
use crate::domain::types::{APP_PASSWORD_SCAN_WINDOW, APP_PASSWORD_SECRET_LEN, AppPassword};
use crate::error::BridgeError;

fn generate_secret() -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..APP_PASSWORD_SECRET_LEN)
        .map(|_| rng.random::<u8>())
        .collect();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Argon2 hashing is CPU-bound; run it off the async runtime.
async fn hash_secret(secret: String) -> Result<String, BridgeError> {
    let hash = task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| anyhow::anyhow!("hash app-password secret: {e}"))
    })
    .await
    .context("app-password hashing task panicked")??;
    Ok(hash)
}

async fn verify_secret(candidate: String, stored_hash: String) -> Result<bool, BridgeError> {
    let matched = task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| anyhow::anyhow!("invalid app-password hash: {e}"))?;
        Ok::<bool, anyhow::Error>(
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
        )
    })
    .await
    .context("app-password verification task panicked")??;
    Ok(matched)
}

// ── Generate ─────────────────────────────────────────────────────────────────

pub struct GenerateAppPasswordUseCase<S: AppPasswordStore> {
    pub app_passwords: S,
}

impl<S: AppPasswordStore> GenerateAppPasswordUseCase<S> {
    /// Mint one new secret, revoking whatever was active for the owner in
    /// the same store operation. The returned plaintext is shown once and
    /// cannot be re-derived.
    pub async fn execute(&self, owner_id: Uuid) -> Result<String, BridgeError> {
        let secret = generate_secret();
        let record = AppPassword {
            id: Uuid::new_v4(),
            owner_id,
            secret_hash: hash_secret(secret.clone()).await?,
            created_at: Utc::now(),
            last_used: None,
            revoked_at: None,
        };
        self.app_passwords.replace_active(&record).await?;
        Ok(secret)
    }
}

// ── Revoke ───────────────────────────────────────────────────────────────────

pub struct RevokeAppPasswordUseCase<S: AppPasswordStore> {
    pub app_passwords: S,
}

impl<S: AppPasswordStore> RevokeAppPasswordUseCase<S> {
    /// Idempotent: revoking with nothing active is a no-op.
    pub async fn execute(&self, owner_id: Uuid) -> Result<u64, BridgeError> {
        self.app_passwords.revoke_active(owner_id).await
    }
}

// ── Consume ──────────────────────────────────────────────────────────────────

pub struct ConsumeAppPasswordUseCase<S: AppPasswordStore> {
    pub app_passwords: S,
    pub ttl_secs: u64,
}

impl<S: AppPasswordStore> ConsumeAppPasswordUseCase<S> {
    /// Try to spend a one-time secret for `owner_id`. Scans the newest
    /// unexpired candidates, verifies each hash, and consumes the first
    /// match through the store's conditional update — two concurrent calls
    /// racing on the same record leave exactly one winner.
    pub async fn execute(&self, owner_id: Uuid, candidate: &str) -> Result<bool, BridgeError> {
        if candidate.is_empty() {
            return Ok(false);
        }

        let cutoff = Utc::now() - Duration::seconds(self.ttl_secs as i64);
        let candidates = self
            .app_passwords
            .recent_candidates(owner_id, cutoff, APP_PASSWORD_SCAN_WINDOW)
            .await?;

        for record in candidates {
            if verify_secret(candidate.to_owned(), record.secret_hash.clone()).await? {
                // A secret matches at most one record; if the conditional
                // update reports a lost race, the attempt is a miss.
                return self.app_passwords.consume(record.id).await;
            }
        }
        Ok(false)
    }
}
