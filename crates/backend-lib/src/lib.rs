// ============================
// travelog-backend/src/lib.rs
// ============================
//! Core backend functionality for the travel journal API.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod stories;
pub mod validation;

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{ephemeral_signing_secret, AuthService, DefaultAuth, TokenService};
use crate::config::{Settings, StorageBackend};
use crate::storage::{CredentialStore, FlatFileStorage, MemoryStorage, StoryStore};
use crate::stories::StoryService;

pub use router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Signup, login and profile flow
    pub auth: Arc<dyn AuthService>,
    /// Story create/list flow
    pub stories: Arc<StoryService>,
    /// Token issuing and verification
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire the flows around explicitly constructed stores
    pub fn new(
        users: Arc<dyn CredentialStore>,
        stories: Arc<dyn StoryStore>,
        settings: Settings,
    ) -> Self {
        let tokens = Arc::new(token_service(&settings));
        let auth = Arc::new(DefaultAuth::new(
            users,
            tokens.clone(),
            settings.password_requirements.clone(),
        ));

        Self {
            auth,
            stories: Arc::new(StoryService::new(stories)),
            tokens,
        }
    }

    /// Open the configured store and build the state. Fails if the store cannot be opened.
    pub fn open(settings: Settings) -> anyhow::Result<Self> {
        match settings.storage {
            StorageBackend::File => {
                let store = Arc::new(FlatFileStorage::new(&settings.data_dir)?);
                info!(data_dir = %settings.data_dir.display(), "opened flat-file store");
                Ok(Self::new(store.clone(), store, settings))
            },
            StorageBackend::Memory => {
                warn!("using in-memory store, data is lost on restart");
                let store = Arc::new(MemoryStorage::new());
                Ok(Self::new(store.clone(), store, settings))
            },
        }
    }
}

fn token_service(settings: &Settings) -> TokenService {
    if settings.jwt_secret.is_empty() {
        warn!("no jwt_secret configured, generating an ephemeral signing secret");
        TokenService::new(ephemeral_signing_secret().as_bytes(), settings.token_ttl())
    } else {
        TokenService::new(settings.jwt_secret.as_bytes(), settings.token_ttl())
    }
}
