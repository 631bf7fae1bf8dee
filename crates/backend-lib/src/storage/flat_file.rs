// ============================
// travelog-backend/src/storage/flat_file.rs
// ============================
//! Flat-file document store.
//!
//! Layout under the root directory:
//! - `users/<id>.json` one document per user
//! - `users/by-email/<sha256(email)>` email index holding the user id
//! - `stories/<owner>.jsonl` append-only story log per owner
//!
//! A user document is written before its index entry, and the index entry
//! is published with a hard link, so an index file is never empty and never
//! names a document that was not written.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, str::FromStr};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::{fs as tokio_fs, io::AsyncWriteExt};
use tracing::warn;
use travelog_common::{TravelStory, UserId};
use uuid::Uuid;

use super::{duplicate_email, CredentialStore, NewStory, NewUser, StoryStore, UserRecord};
use crate::error::AppError;

/// Flat-file implementation of the store traits
#[derive(Clone, Debug)]
pub struct FlatFileStorage {
    root: PathBuf,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("users").join("by-email"))?;
        fs::create_dir_all(root.join("stories"))?;
        Ok(Self { root })
    }

    fn user_path(&self, id: UserId) -> PathBuf {
        self.root.join("users").join(format!("{id}.json"))
    }

    /// Fixed-length key, whatever the length of the email
    fn email_index_path(&self, email: &str) -> PathBuf {
        let digest = Sha256::digest(email.as_bytes());
        self.root
            .join("users")
            .join("by-email")
            .join(format!("{digest:x}"))
    }

    fn stories_path(&self, owner: UserId) -> PathBuf {
        self.root.join("stories").join(format!("{owner}.jsonl"))
    }
}

/// Write to a sibling temp file, then rename over the target
async fn write_document(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let tmp = path.with_extension("tmp");
    tokio_fs::write(&tmp, contents).await?;
    tokio_fs::rename(&tmp, path).await?;
    Ok(())
}

async fn read_optional(path: &Path) -> Result<Option<String>, AppError> {
    match tokio_fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Best-effort removal during rollback; failures are logged, not returned
async fn discard(path: &Path) {
    match tokio_fs::remove_file(path).await {
        Ok(()) => {},
        Err(e) if e.kind() == ErrorKind::NotFound => {},
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove file during rollback"),
    }
}

#[async_trait]
impl CredentialStore for FlatFileStorage {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let record = user.into_record();
        let doc_path = self.user_path(record.id);
        let index = self.email_index_path(&record.email);

        let doc = serde_json::to_vec_pretty(&record)?;
        write_document(&doc_path, &doc).await?;

        // hard_link fails with AlreadyExists when the email is taken, which
        // makes the index file the uniqueness constraint
        let pending = index.with_extension(format!("{}.tmp", record.id));
        let linked = async {
            tokio_fs::write(&pending, record.id.to_string()).await?;
            tokio_fs::hard_link(&pending, &index).await
        }
        .await;
        discard(&pending).await;

        match linked {
            Ok(()) => Ok(record),
            Err(e) => {
                discard(&doc_path).await;
                if e.kind() == ErrorKind::AlreadyExists {
                    Err(duplicate_email())
                } else {
                    Err(e.into())
                }
            },
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let Some(content) = read_optional(&self.email_index_path(email)).await? else {
            return Ok(None);
        };

        let id = Uuid::from_str(content.trim())
            .map_err(|e| AppError::Internal(format!("Corrupt email index for user: {e}")))?;
        self.find_user_by_id(id).await
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError> {
        match read_optional(&self.user_path(id)).await? {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl StoryStore for FlatFileStorage {
    /// Append one JSON line to the owner's story log.
    async fn insert_story(&self, story: NewStory) -> Result<TravelStory, AppError> {
        let story = story.into_story();
        let path = self.stories_path(story.user_id);

        let mut line = serde_json::to_vec(&story)?;
        line.push(b'\n');

        let mut file = tokio_fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        // single write keeps concurrent appends line-atomic
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(story)
    }

    async fn stories_for_owner(&self, owner: UserId) -> Result<Vec<TravelStory>, AppError> {
        let Some(content) = read_optional(&self.stories_path(owner)).await? else {
            return Ok(Vec::new());
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(AppError::from))
            .collect()
    }
}
