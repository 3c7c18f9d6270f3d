use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::domain::repository::{AppPasswordStore, UserStore};
use crate::error::BridgeError;
use crate::scram::{self, ScramAlgorithm};
use crate::usecase::app_password::ConsumeAppPasswordUseCase;
use crate::usecase::token;

/// Bound on each identity/app-password store call; an elapsed timeout is
/// reported as `StoreUnavailable`, never a hang.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

async fn with_store_timeout<T>(
    fut: impl Future<Output = Result<T, BridgeError>>,
) -> Result<T, BridgeError> {
    match timeout(STORE_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(BridgeError::StoreUnavailable),
    }
}

pub struct BridgeLoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct BridgeLoginOutput {
    pub access_token: String,
    pub email: String,
    pub scram_sha512_verifier: String,
    pub scram_sha256_verifier: String,
}

/// The login contract the IRC services daemon calls: validate primary
/// credentials (or a one-time app password), then hand back a signed
/// assertion plus fresh SCRAM verifiers.
pub struct BridgeLoginUseCase<U: UserStore, A: AppPasswordStore + Clone> {
    pub users: U,
    pub app_passwords: A,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_ttl_secs: u64,
    pub app_password_ttl_secs: u64,
    pub scram_iterations: u32,
    pub scram_salt_len: usize,
}

impl<U: UserStore, A: AppPasswordStore + Clone> BridgeLoginUseCase<U, A> {
    pub async fn execute(&self, input: BridgeLoginInput) -> Result<BridgeLoginOutput, BridgeError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(BridgeError::MissingFields);
        }

        let user = with_store_timeout(self.users.find_by_username(&input.username))
            .await?
            .ok_or(BridgeError::InvalidCredentials)?;

        // Inactive and unverified accounts fail exactly like a bad password,
        // and before any one-time secret can be burned on a doomed login.
        if !user.is_active || !user.email_verified {
            return Err(BridgeError::InvalidCredentials);
        }

        let primary_ok =
            with_store_timeout(self.users.verify_password(&user, &input.password)).await?;
        let authenticated = if primary_ok {
            true
        } else {
            // Fallback path for clients that cannot present the primary
            // password: the supplied value may be a one-time app password.
            let consume = ConsumeAppPasswordUseCase {
                app_passwords: self.app_passwords.clone(),
                ttl_secs: self.app_password_ttl_secs,
            };
            with_store_timeout(consume.execute(user.id, &input.password)).await?
        };
        if !authenticated {
            return Err(BridgeError::InvalidCredentials);
        }

        let access_token = token::issue(
            &user.username,
            &self.jwt_issuer,
            &self.jwt_secret,
            self.jwt_ttl_secs,
        )?;

        // Verifiers are an enhancement: a derivation failure is logged and
        // leaves the field empty, but the assertion is still returned.
        let scram_sha512_verifier = self.derive_or_empty(&input.password, ScramAlgorithm::Sha512);
        let scram_sha256_verifier = self.derive_or_empty(&input.password, ScramAlgorithm::Sha256);

        Ok(BridgeLoginOutput {
            access_token,
            email: user.email,
            scram_sha512_verifier,
            scram_sha256_verifier,
        })
    }

    fn derive_or_empty(&self, password: &str, algorithm: ScramAlgorithm) -> String {
        match scram::derive_verifier(
            password,
            algorithm,
            self.scram_iterations,
            self.scram_salt_len,
        ) {
            Ok(verifier) => verifier,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    algorithm = algorithm.mechanism_suffix(),
                    "scram verifier derivation failed"
                );
                String::new()
            }
        }
    }
}
