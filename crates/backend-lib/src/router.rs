// ============================
// travelog-backend/src/router.rs
// ============================
//! Route table.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{add_travel_story, create_account, get_all_stories, get_user, login};
use crate::AppState;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/create-account", post(create_account))
        .route("/login", post(login))
        .route("/get-user", get(get_user))
        .route("/add-travel-story", post(add_travel_story))
        .route("/get-all-story", get(get_all_stories))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
