// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between the travel journal client and server.
//! This module defines the JSON request and response bodies and the
//! public projections of stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a registered user
pub type UserId = Uuid;

/// Identity of a travel story
pub type StoryId = Uuid;

/// Public view of a user record. The password hash never leaves the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub created_on: DateTime<Utc>,
}

/// Projection returned alongside an access token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub full_name: String,
    pub email: String,
}

/// A travel story owned by exactly one user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TravelStory {
    pub id: StoryId,
    pub title: String,
    pub story: String,
    /// Ordered place labels, may be empty
    #[serde(default)]
    pub visited_location: Vec<String>,
    pub visited_date: DateTime<Utc>,
    pub image_url: String,
    #[serde(default)]
    pub is_favourite: bool,
    pub created_on: DateTime<Utc>,
    /// Back-reference to the owning user
    pub user_id: UserId,
}

/// Body of `POST /create-account`
///
/// Every field defaults to empty so that missing values reach validation
/// instead of failing deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /login`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /add-travel-story`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewStoryRequest {
    pub title: String,
    pub story: String,
    pub visited_location: Option<Vec<String>>,
    /// Milliseconds since the Unix epoch
    pub visited_date: Option<i64>,
    pub image_url: String,
}

/// Success body of signup and login
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub error: bool,
    pub access_token: String,
    pub user: UserSummary,
    pub message: String,
}

/// Success body of `GET /get-user`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub user: User,
    pub message: String,
}

/// Success body of `POST /add-travel-story`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    pub error: bool,
    pub travel_story: TravelStory,
    pub message: String,
}

/// Success body of `GET /get-all-story`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoriesResponse {
    pub stories: Vec<TravelStory>,
}
