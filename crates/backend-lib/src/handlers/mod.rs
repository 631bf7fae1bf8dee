// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers for the travel journal API.
use axum::extract::FromRequest;

use crate::error::AppError;

pub mod account;
pub mod stories;

pub use account::{create_account, get_user, login};
pub use stories::{add_travel_story, get_all_stories};

/// JSON body extractor whose rejections render as `InvalidInput`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
