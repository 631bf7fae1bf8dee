//! Travel story handlers.
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use travelog_common::{NewStoryRequest, StoriesResponse, StoryResponse};

use super::ApiJson;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::AppState;

/// `POST /add-travel-story`
///
/// `AuthUser` is extracted before the body, so an unauthenticated call is
/// rejected without reading or persisting anything.
pub async fn add_travel_story(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<NewStoryRequest>,
) -> Result<(StatusCode, Json<StoryResponse>), AppError> {
    let travel_story = state.stories.create(user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(StoryResponse {
            error: false,
            travel_story,
            message: "Added successfully".to_string(),
        }),
    ))
}

/// `GET /get-all-story`
pub async fn get_all_stories(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StoriesResponse>, AppError> {
    let stories = state.stories.list(user_id).await?;
    Ok(Json(StoriesResponse { stories }))
}
