use async_trait::async_trait;
use credgate_common::{CredentialsRequest, UserSummary, UsersRequest};

use crate::error::AppError;
use crate::storage::Role;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a `user` account. Every rejection carries a specific reason.
    async fn register(&self, request: &CredentialsRequest) -> Result<(), AppError>;

    /// Authenticate and return the stored role.
    ///
    /// All credential failures collapse into [`AppError::InvalidCredentials`]
    /// after the same delay. `client` identifies the caller for lockouts.
    async fn login(&self, request: &CredentialsRequest, client: &str) -> Result<Role, AppError>;

    /// List every account if the claimed caller is an admin
    async fn list_users(&self, request: &UsersRequest) -> Result<Vec<UserSummary>, AppError>;

    /// Create the admin account unless the username exists. Returns whether it was created.
    async fn seed_admin(&self, username: &str, password: &str) -> Result<bool, AppError>;
}
