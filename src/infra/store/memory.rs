use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    application::repos::{PostStore, StoreError},
    domain::entities::PostRecord,
};

/// Process-local storage, for tests and throwaway instances.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: Mutex<Vec<PostRecord>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<PostRecord>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }

    pub async fn snapshot(&self) -> Vec<PostRecord> {
        self.posts.lock().await.clone()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn load_all(&self) -> Result<Vec<PostRecord>, StoreError> {
        Ok(self.posts.lock().await.clone())
    }

    async fn save_all(&self, posts: &[PostRecord]) -> Result<(), StoreError> {
        *self.posts.lock().await = posts.to_vec();
        Ok(())
    }
}
