//! Storage traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::PostRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post storage at `{location}` is unavailable")]
    StorageUnavailable {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("post storage at `{location}` holds corrupt data: {reason}")]
    CorruptData { location: String, reason: String },
}

impl StoreError {
    pub fn unavailable(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            location: location.into(),
            source,
        }
    }

    pub fn corrupt(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::CorruptData {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Whole-collection persistence for posts.
///
/// The collection is always read and written in full; implementations never
/// patch individual records.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<PostRecord>, StoreError>;

    async fn save_all(&self, posts: &[PostRecord]) -> Result<(), StoreError>;
}
