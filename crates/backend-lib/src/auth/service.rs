use async_trait::async_trait;
use travelog_common::{LoginRequest, SignupRequest, User, UserId, UserSummary};

use crate::error::AppError;

/// Outcome of a successful signup or login
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: UserId,
    pub access_token: String,
    pub user: UserSummary,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate, enforce email uniqueness, hash, persist and issue a token
    async fn signup(&self, req: SignupRequest) -> Result<AuthSession, AppError>;
    /// Check credentials and issue a token
    async fn login(&self, req: LoginRequest) -> Result<AuthSession, AppError>;
    /// Resolve the account behind an authenticated id
    async fn profile(&self, user_id: UserId) -> Result<User, AppError>;
}
