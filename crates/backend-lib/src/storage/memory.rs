// ============================
// travelog-backend/src/storage/memory.rs
// ============================
//! In-process store backed by concurrent maps.
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use travelog_common::{TravelStory, UserId};

use super::{duplicate_email, CredentialStore, NewStory, NewUser, StoryStore, UserRecord};
use crate::error::AppError;

#[derive(Clone, Default)]
pub struct MemoryStorage {
    users: Arc<DashMap<UserId, UserRecord>>,
    emails: Arc<DashMap<String, UserId>>,
    stories: Arc<DashMap<UserId, Vec<TravelStory>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStorage {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(duplicate_email()),
            Entry::Vacant(slot) => {
                let record = user.into_record();
                self.users.insert(record.id, record.clone());
                slot.insert(record.id);
                Ok(record)
            },
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl StoryStore for MemoryStorage {
    async fn insert_story(&self, story: NewStory) -> Result<TravelStory, AppError> {
        let story = story.into_story();
        self.stories
            .entry(story.user_id)
            .or_default()
            .push(story.clone());
        Ok(story)
    }

    async fn stories_for_owner(&self, owner: UserId) -> Result<Vec<TravelStory>, AppError> {
        Ok(self
            .stories
            .get(&owner)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
