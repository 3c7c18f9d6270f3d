use anyhow::Context as _;
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tokio::task;
use uuid::Uuid;

use ircgate_bridge_schema::{app_passwords, users};

use crate::domain::repository::{AppPasswordStore, UserStore};
use crate::domain::types::{AppPassword, BridgeUser};
use crate::error::BridgeError;

// ── User store ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserStore {
    pub db: DatabaseConnection,
}

impl UserStore for DbUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<BridgeUser>, BridgeError> {
        let model = users::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(users::Column::Username)))
                    .eq(username.to_lowercase()),
            )
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn verify_password(
        &self,
        user: &BridgeUser,
        password: &str,
    ) -> Result<bool, BridgeError> {
        let stored_hash = user.password_hash.clone();
        let password = password.to_owned();

        // Argon2 verification is CPU-intensive; keep it off the async runtime.
        let matched = task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&stored_hash)
                .map_err(|e| anyhow::anyhow!("invalid password hash format: {e}"))?;
            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
            )
        })
        .await
        .context("password verification task panicked")??;
        Ok(matched)
    }
}

fn user_from_model(model: users::Model) -> BridgeUser {
    BridgeUser {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        email: model.email,
        is_active: model.is_active,
        email_verified: model.email_verified,
    }
}

// ── App-password store ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAppPasswordStore {
    pub db: DatabaseConnection,
}

impl AppPasswordStore for DbAppPasswordStore {
    async fn replace_active(&self, record: &AppPassword) -> Result<(), BridgeError> {
        // Revoke-then-insert must commit as one unit or two concurrent
        // generations can leave two active records for the owner.
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let record = record.clone();
                Box::pin(async move {
                    revoke_active_in(txn, record.owner_id).await?;
                    insert_app_password(txn, &record).await?;
                    Ok(())
                })
            })
            .await
            .context("replace active app password")?;
        Ok(())
    }

    async fn revoke_active(&self, owner_id: Uuid) -> Result<u64, BridgeError> {
        let revoked = revoke_active_in(&self.db, owner_id)
            .await
            .context("revoke active app passwords")?;
        Ok(revoked)
    }

    async fn recent_candidates(
        &self,
        owner_id: Uuid,
        cutoff: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<AppPassword>, BridgeError> {
        let models = app_passwords::Entity::find()
            .filter(app_passwords::Column::OwnerId.eq(owner_id))
            .filter(app_passwords::Column::RevokedAt.is_null())
            .filter(app_passwords::Column::LastUsed.is_null())
            .filter(app_passwords::Column::CreatedAt.gte(cutoff))
            .order_by_desc(app_passwords::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list app-password candidates")?;
        Ok(models.into_iter().map(app_password_from_model).collect())
    }

    async fn consume(&self, id: Uuid) -> Result<bool, BridgeError> {
        let now = Utc::now();
        // Conditional update on `last_used IS NULL`: when two requests race
        // on the same record the database lets exactly one through.
        let result = app_passwords::Entity::update_many()
            .col_expr(app_passwords::Column::LastUsed, Expr::value(now))
            .col_expr(app_passwords::Column::RevokedAt, Expr::value(now))
            .filter(app_passwords::Column::Id.eq(id))
            .filter(app_passwords::Column::LastUsed.is_null())
            .exec(&self.db)
            .await
            .context("consume app password")?;
        Ok(result.rows_affected == 1)
    }
}

async fn revoke_active_in<C: ConnectionTrait>(
    conn: &C,
    owner_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = app_passwords::Entity::update_many()
        .col_expr(app_passwords::Column::RevokedAt, Expr::value(Utc::now()))
        .filter(app_passwords::Column::OwnerId.eq(owner_id))
        .filter(app_passwords::Column::RevokedAt.is_null())
        .filter(app_passwords::Column::LastUsed.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

async fn insert_app_password<C: ConnectionTrait>(
    conn: &C,
    record: &AppPassword,
) -> Result<(), sea_orm::DbErr> {
    app_passwords::ActiveModel {
        id: Set(record.id),
        owner_id: Set(record.owner_id),
        secret_hash: Set(record.secret_hash.clone()),
        created_at: Set(record.created_at),
        last_used: Set(None),
        revoked_at: Set(None),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn app_password_from_model(model: app_passwords::Model) -> AppPassword {
    AppPassword {
        id: model.id,
        owner_id: model.owner_id,
        secret_hash: model.secret_hash,
        created_at: model.created_at,
        last_used: model.last_used,
        revoked_at: model.revoked_at,
    }
}
