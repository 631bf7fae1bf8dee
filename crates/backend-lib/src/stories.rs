// ============================
// travelog-backend/src/stories.rs
// ============================
//! Story flow: authenticated create and list, scoped to the caller.
use std::sync::Arc;

use metrics::counter;
use tracing::info;
use travelog_common::{NewStoryRequest, TravelStory, UserId};

use crate::error::AppError;
use crate::metrics::{STORY_CREATED, STORY_LISTED};
use crate::storage::StoryStore;
use crate::validation;

pub struct StoryService {
    store: Arc<dyn StoryStore>,
}

impl StoryService {
    pub fn new(store: Arc<dyn StoryStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a story owned by `owner`
    pub async fn create(
        &self,
        owner: UserId,
        req: NewStoryRequest,
    ) -> Result<TravelStory, AppError> {
        let new_story = validation::validate_story(owner, req)?;
        let story = self.store.insert_story(new_story).await?;

        counter!(STORY_CREATED).increment(1);
        info!(user_id = %owner, story_id = %story.id, "story created");
        Ok(story)
    }

    /// Stories of `owner`, favourites first
    pub async fn list(&self, owner: UserId) -> Result<Vec<TravelStory>, AppError> {
        let mut stories = self.store.stories_for_owner(owner).await?;
        sort_favourites_first(&mut stories);

        counter!(STORY_LISTED).increment(1);
        Ok(stories)
    }
}

/// Stable: stories with equal flags keep the store's order
pub fn sort_favourites_first(stories: &mut [TravelStory]) {
    stories.sort_by_key(|story| !story.is_favourite);
}
