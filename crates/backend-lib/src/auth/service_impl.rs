use std::hint::black_box;
use std::time::Duration;

use async_trait::async_trait;
use credgate_common::{CredentialsRequest, UserSummary, UsersRequest};
use ::metrics::counter;
use serde_json::Value;
use tracing::{info, warn};

use super::password::{generate_salt, hash_password, verify_password};
use super::{AuthRateLimiter, AuthService};
use crate::config::AuthSettings;
use crate::error::AppError;
use crate::metrics::{
    LOGIN_FAILURE, LOGIN_LOCKED, LOGIN_SUCCESS, REGISTER_REJECTED, REGISTER_SUCCESS, USERS_DENIED,
};
use crate::storage::{CredentialRecord, Role, Storage};
use crate::validation::{
    detect_injection_value, provided, text_length, validate_password, validate_username,
    MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH,
};

/// Why a login failed. Only ever logged, never returned to the caller.
#[derive(Debug)]
enum LoginFailure {
    Missing,
    Injection,
    Malformed,
    TooLong,
    UnknownUser,
    WrongPassword,
}

impl LoginFailure {
    /// Whether the branch already paid for a digest against a stored record
    fn verified_digest(&self) -> bool {
        matches!(self, LoginFailure::WrongPassword)
    }
}

pub struct DefaultAuth<S> {
    storage: S,
    limiter: AuthRateLimiter,
    failure_delay: Duration,
    // Verified against on every failure that never reached a stored record,
    // so each failing login costs one digest.
    decoy: CredentialRecord,
}

impl<S: Storage> DefaultAuth<S> {
    pub fn new(storage: S, limiter: AuthRateLimiter, settings: &AuthSettings) -> Self {
        let salt = generate_salt();
        let hash = hash_password(&generate_salt(), &salt);
        Self {
            storage,
            limiter,
            failure_delay: settings.failure_delay(),
            decoy: CredentialRecord::new(salt, hash, Role::User),
        }
    }

    async fn try_register(&self, request: &CredentialsRequest) -> Result<String, AppError> {
        let (Some(username), Some(password)) = (
            provided(request.username.as_ref()),
            provided(request.password.as_ref()),
        ) else {
            return Err(AppError::MissingCredentials);
        };

        if detect_injection_value(username) || detect_injection_value(password) {
            warn!(username = %username, "injection pattern in registration");
            return Err(AppError::InjectionDetected);
        }

        let username = validate_username(username)?;
        let password = validate_password(password)?;

        if self.storage.contains(username).await? {
            return Err(AppError::UsernameTaken);
        }

        let salt = generate_salt();
        let hash = hash_password(password, &salt);
        self.storage
            .insert_if_absent(username, CredentialRecord::new(salt, hash, Role::User))
            .await?;

        Ok(username.to_string())
    }

    async fn authenticate(
        &self,
        request: &CredentialsRequest,
    ) -> Result<Result<Role, LoginFailure>, AppError> {
        let (Some(username), Some(password)) = (
            provided(request.username.as_ref()),
            provided(request.password.as_ref()),
        ) else {
            return Ok(Err(LoginFailure::Missing));
        };

        if detect_injection_value(username) || detect_injection_value(password) {
            return Ok(Err(LoginFailure::Injection));
        }

        let (Value::String(username), Value::String(password)) = (username, password) else {
            return Ok(Err(LoginFailure::Malformed));
        };

        if text_length(username) > MAX_USERNAME_LENGTH || text_length(password) > MAX_PASSWORD_LENGTH
        {
            return Ok(Err(LoginFailure::TooLong));
        }

        let Some(record) = self.storage.get(username).await? else {
            return Ok(Err(LoginFailure::UnknownUser));
        };

        if verify_password(password, &record.salt, &record.hash) {
            Ok(Ok(record.role))
        } else {
            Ok(Err(LoginFailure::WrongPassword))
        }
    }

    /// Verify against the decoy record. The result is meaningless; only the
    /// work counts, so keep the optimiser from dropping it.
    fn verify_decoy(&self, password: &str) {
        black_box(verify_password(
            black_box(password),
            &self.decoy.salt,
            &self.decoy.hash,
        ));
    }
}

#[async_trait]
impl<S: Storage> AuthService for DefaultAuth<S> {
    async fn register(&self, request: &CredentialsRequest) -> Result<(), AppError> {
        match self.try_register(request).await {
            Ok(username) => {
                counter!(REGISTER_SUCCESS).increment(1);
                info!(%username, "user registered");
                Ok(())
            },
            Err(err) => {
                counter!(REGISTER_REJECTED).increment(1);
                Err(err)
            },
        }
    }

    async fn login(&self, request: &CredentialsRequest, client: &str) -> Result<Role, AppError> {
        let claimed = request.username_str().unwrap_or_default();
        let key = AuthRateLimiter::key(client, claimed);

        if !self.limiter.check(&key) {
            counter!(LOGIN_LOCKED).increment(1);
            warn!(client, username = claimed, "login refused while locked out");
            return Err(AppError::AuthRateLimited);
        }

        match self.authenticate(request).await? {
            Ok(role) => {
                self.limiter.record_success(&key);
                counter!(LOGIN_SUCCESS).increment(1);
                info!(username = claimed, %role, "login succeeded");
                Ok(role)
            },
            Err(reason) => {
                if !reason.verified_digest() {
                    self.verify_decoy(request.password_str().unwrap_or_default());
                }
                self.limiter.record_failure(&key);
                counter!(LOGIN_FAILURE).increment(1);
                warn!(client, username = claimed, ?reason, "login failed");
                tokio::time::sleep(self.failure_delay).await;
                Err(AppError::InvalidCredentials)
            },
        }
    }

    async fn list_users(&self, request: &UsersRequest) -> Result<Vec<UserSummary>, AppError> {
        let Some(caller) = provided(request.username.as_ref()) else {
            return Err(AppError::Unauthorized);
        };

        let record = match caller.as_str() {
            Some(name) => self.storage.get(name).await?,
            None => None,
        };

        match record {
            Some(record) if record.role == Role::Admin => self.storage.list().await,
            _ => {
                counter!(USERS_DENIED).increment(1);
                warn!(caller = %caller, "user listing denied");
                Err(AppError::Forbidden)
            },
        }
    }

    async fn seed_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if self.storage.contains(username).await? {
            return Ok(false);
        }

        let salt = generate_salt();
        let hash = hash_password(password, &salt);
        match self
            .storage
            .insert_if_absent(username, CredentialRecord::new(salt, hash, Role::Admin))
            .await
        {
            Ok(()) => {
                warn!(%username, "admin account seeded with configured default password");
                Ok(true)
            },
            Err(AppError::UsernameTaken) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
