//! Domain entities mirrored from persistent storage.

use serde::{Deserialize, Deserializer, Serialize};

/// A single blog entry as stored in the dataset.
///
/// Older datasets omit `likes` and `created_at`; both decode to their defaults
/// and a missing `created_at` stays missing when the record is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub content: String,
    #[serde(
        default,
        deserialize_with = "blank_timestamp_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes: u64,
}

/// The user-editable part of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub author: String,
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

fn blank_timestamp_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.is_empty()))
}
