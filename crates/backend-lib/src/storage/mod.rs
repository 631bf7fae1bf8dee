// ============================
// travelog-backend/src/storage/mod.rs
// ============================
//! Storage abstraction for user credentials and travel stories.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use travelog_common::{TravelStory, User, UserId, UserSummary};

use crate::error::AppError;

mod flat_file;
mod memory;

pub use flat_file::FlatFileStorage;
pub use memory::MemoryStorage;

/// Stored user document, including the password hash
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_on: DateTime<Utc>,
}

impl UserRecord {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn to_public(&self) -> User {
        User {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            created_on: self.created_on,
        }
    }
}

/// A user about to be created; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    fn into_record(self) -> UserRecord {
        UserRecord {
            id: uuid::Uuid::new_v4(),
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            created_on: Utc::now(),
        }
    }
}

/// A story about to be created; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewStory {
    pub user_id: UserId,
    pub title: String,
    pub story: String,
    pub visited_location: Vec<String>,
    pub visited_date: DateTime<Utc>,
    pub image_url: String,
    pub is_favourite: bool,
}

impl NewStory {
    fn into_story(self) -> TravelStory {
        TravelStory {
            id: uuid::Uuid::new_v4(),
            title: self.title,
            story: self.story,
            visited_location: self.visited_location,
            visited_date: self.visited_date,
            image_url: self.image_url,
            is_favourite: self.is_favourite,
            created_on: Utc::now(),
            user_id: self.user_id,
        }
    }
}

/// Owner of user records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new user. Fails with `Conflict` when the email is taken,
    /// even when two inserts race.
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError>;
}

/// Owner of travel story records
#[async_trait]
pub trait StoryStore: Send + Sync {
    async fn insert_story(&self, story: NewStory) -> Result<TravelStory, AppError>;

    /// All stories of `owner`, in insertion order
    async fn stories_for_owner(&self, owner: UserId) -> Result<Vec<TravelStory>, AppError>;
}

fn duplicate_email() -> AppError {
    AppError::Conflict("User already exists".to_string())
}
