use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use tracing::{info, warn};
use travelog_common::{LoginRequest, SignupRequest, User, UserId};

use crate::auth::{
    hash_password_secure, verify_password_blocking, AuthService, AuthSession,
    PasswordRequirements, TokenService,
};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED, SIGNUP_CREATED, SIGNUP_REJECTED};
use crate::storage::{CredentialStore, NewUser};
use crate::validation;

pub struct DefaultAuth {
    users: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    requirements: PasswordRequirements,
}

impl DefaultAuth {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        tokens: Arc<TokenService>,
        requirements: PasswordRequirements,
    ) -> Self {
        Self {
            users,
            tokens,
            requirements,
        }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn signup(&self, req: SignupRequest) -> Result<AuthSession, AppError> {
        if let Err(e) = validation::validate_signup(&req, &self.requirements) {
            counter!(SIGNUP_REJECTED).increment(1);
            return Err(e);
        }

        let SignupRequest {
            full_name,
            email,
            password,
        } = req;

        if self.users.find_user_by_email(&email).await?.is_some() {
            counter!(SIGNUP_REJECTED).increment(1);
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password_secure(password).await?;

        // A concurrent signup for the same email loses here with Conflict
        let user = self
            .users
            .insert_user(NewUser {
                full_name,
                email,
                password_hash,
            })
            .await?;

        let access_token = self.tokens.issue(user.id)?;

        counter!(SIGNUP_CREATED).increment(1);
        info!(user_id = %user.id, "account created");

        Ok(AuthSession {
            user_id: user.id,
            access_token,
            user: user.summary(),
        })
    }

    async fn login(&self, req: LoginRequest) -> Result<AuthSession, AppError> {
        validation::validate_login(&req)?;

        let LoginRequest { email, password } = req;

        let Some(user) = self.users.find_user_by_email(&email).await? else {
            counter!(LOGIN_FAILED).increment(1);
            return Err(AppError::NotFound(
                "User does not exist, please sign up".to_string(),
            ));
        };

        // No extra timing equalisation between the unknown-email and wrong-password paths
        if !verify_password_blocking(user.password_hash.clone(), password).await? {
            counter!(LOGIN_FAILED).increment(1);
            warn!(user_id = %user.id, "login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(user.id)?;

        counter!(LOGIN_SUCCEEDED).increment(1);
        info!(user_id = %user.id, "login");

        Ok(AuthSession {
            user_id: user.id,
            access_token,
            user: user.summary(),
        })
    }

    async fn profile(&self, user_id: UserId) -> Result<User, AppError> {
        match self.users.find_user_by_id(user_id).await? {
            Some(user) => Ok(user.to_public()),
            None => {
                warn!(%user_id, "token references a missing account");
                Err(AppError::Unauthenticated)
            },
        }
    }
}
