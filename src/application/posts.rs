//! Read-modify-write operations over the post collection.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    application::{
        clock::Clock,
        repos::{PostStore, StoreError},
    },
    domain::{
        entities::{PostDraft, PostRecord},
        error::DomainError,
        posts,
    },
};

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PostServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound { .. }))
    }
}

/// Post operations backed by a whole-collection store.
///
/// Mutations hold `write_lock` across load, change and save, so two requests
/// served by one process never overwrite each other's changes. Writers in
/// other processes are not coordinated.
pub struct PostService {
    store: Arc<dyn PostStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<PostRecord>, PostServiceError> {
        Ok(self.store.load_all().await?)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<PostRecord, PostServiceError> {
        let posts = self.store.load_all().await?;
        posts::find(&posts, id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(posts::ENTITY, id).into())
    }

    pub async fn create(&self, draft: PostDraft) -> Result<PostRecord, PostServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load_all().await?;

        let record = posts::append_new(&mut posts, draft, self.clock.now())?;
        self.store.save_all(&posts).await?;

        info!(
            target = "masthead::posts",
            id = record.id,
            total = posts.len(),
            "post created"
        );
        Ok(record)
    }

    pub async fn update(
        &self,
        id: u64,
        draft: PostDraft,
    ) -> Result<PostRecord, PostServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load_all().await?;

        let record = posts::apply_update(&mut posts, id, draft)?.clone();
        self.store.save_all(&posts).await?;

        info!(target = "masthead::posts", id, "post updated");
        Ok(record)
    }

    /// Remove the post with `id`. Absent ids are not an error; the collection
    /// is written back either way.
    pub async fn remove(&self, id: u64) -> Result<bool, PostServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load_all().await?;

        let removed = posts::remove(&mut posts, id);
        self.store.save_all(&posts).await?;

        if removed {
            info!(target = "masthead::posts", id, "post deleted");
        } else {
            debug!(target = "masthead::posts", id, "delete of unknown post ignored");
        }
        Ok(removed)
    }

    pub async fn increment_likes(&self, id: u64) -> Result<u64, PostServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load_all().await?;

        let likes = posts::increment_likes(&mut posts, id)?;
        self.store.save_all(&posts).await?;

        debug!(target = "masthead::posts", id, likes, "post liked");
        Ok(likes)
    }
}
