//! Bearer token gate for protected routes.
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use metrics::counter;
use tracing::warn;
use travelog_common::UserId;

use crate::auth::{TokenError, TokenService};
use crate::error::AppError;
use crate::metrics::TOKEN_REJECTED;
use crate::AppState;

/// Scheme prefix expected in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of a raw `Authorization` value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}

/// Resolve the caller from a raw `Authorization` value
pub fn authorize(header: Option<&str>, tokens: &TokenService) -> Result<UserId, AppError> {
    let result = match bearer_token(header) {
        Some(token) => tokens.verify(token),
        None => Err(TokenError::Missing),
    };

    result.map_err(|reason| {
        counter!(TOKEN_REJECTED).increment(1);
        warn!(%reason, "rejected request token");
        AppError::from(reason)
    })
}

/// Authenticated caller. Extracting it runs the gate before the handler body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Ok(AuthUser(authorize(header, &state.tokens)?))
    }
}
