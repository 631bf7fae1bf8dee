//! Signup, login and profile handlers.
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use travelog_common::{AuthResponse, LoginRequest, SignupRequest, UserResponse};

use super::ApiJson;
use crate::auth::AuthSession;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::AppState;

fn auth_response(session: AuthSession, message: &str) -> AuthResponse {
    AuthResponse {
        error: false,
        access_token: session.access_token,
        user: session.user,
        message: message.to_string(),
    }
}

/// `POST /create-account`
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let session = state.auth.signup(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(auth_response(session, "Registration successful")),
    ))
}

/// `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let session = state.auth.login(req).await?;
    Ok(Json(auth_response(session, "Login successful")))
}

/// `GET /get-user`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth.profile(user_id).await?;
    Ok(Json(UserResponse {
        user,
        message: "Successful".to_string(),
    }))
}
