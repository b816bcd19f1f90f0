//! JSON file backed post storage.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::debug;

use crate::{
    application::repos::{PostStore, StoreError},
    domain::{entities::PostRecord, posts},
};

const INDENT: &[u8] = b"    ";

/// Stores the whole collection as one pretty-printed JSON array.
///
/// Writes go to a temporary sibling file that is renamed over the dataset,
/// so readers see either the previous or the next collection, never a
/// truncated one.
#[derive(Debug, Clone)]
pub struct JsonFilePostStore {
    path: PathBuf,
}

impl JsonFilePostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty dataset. An existing file is left untouched unless
    /// `force` is set; the return value says whether anything was written.
    pub async fn initialize(&self, force: bool) -> Result<bool, StoreError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|err| StoreError::unavailable(self.location(), err))?;
        if exists && !force {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::unavailable(self.location(), err))?;
        }

        self.save_all(&[]).await?;
        Ok(true)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl PostStore for JsonFilePostStore {
    async fn load_all(&self) -> Result<Vec<PostRecord>, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|err| StoreError::unavailable(self.location(), err))?;

        let posts: Vec<PostRecord> = serde_json::from_slice(&bytes)
            .map_err(|err| StoreError::corrupt(self.location(), err))?;
        posts::ensure_unique_ids(&posts)
            .map_err(|err| StoreError::corrupt(self.location(), err))?;

        debug!(
            target = "masthead::store",
            path = %self.path.display(),
            posts = posts.len(),
            "loaded posts"
        );
        Ok(posts)
    }

    async fn save_all(&self, posts: &[PostRecord]) -> Result<(), StoreError> {
        let bytes = encode(posts).map_err(|err| StoreError::unavailable(self.location(), err))?;
        let path = self.path.clone();

        task::spawn_blocking(move || replace_atomically(&path, &bytes))
            .await
            .map_err(|err| StoreError::unavailable(self.location(), io::Error::other(err)))?
            .map_err(|err| StoreError::unavailable(self.location(), err))?;

        debug!(
            target = "masthead::store",
            path = %self.path.display(),
            posts = posts.len(),
            "saved posts"
        );
        Ok(())
    }
}

fn encode(posts: &[PostRecord]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    posts.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

fn replace_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(directory)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn sample() -> Vec<PostRecord> {
        vec![
            PostRecord {
                id: 1,
                author: "Ada".to_string(),
                title: "Engines".to_string(),
                content: "<b>bold</b> & notes".to_string(),
                created_at: Some("2024-01-05 15:45:00".to_string()),
                likes: 2,
            },
            PostRecord {
                id: 2,
                author: "Grace".to_string(),
                title: "Legacy".to_string(),
                content: "no timestamp".to_string(),
                created_at: None,
                likes: 0,
            },
        ]
    }

    fn store_in(dir: &TempDir) -> JsonFilePostStore {
        JsonFilePostStore::new(dir.path().join("blog_posts.json"))
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = store_in(&dir).load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn unparsable_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }

    #[tokio::test]
    async fn duplicate_ids_are_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"[{"id": 1, "author": "", "title": "", "content": ""},
                {"id": 1, "author": "", "title": "", "content": ""}]"#,
        )
        .unwrap();

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_all(&sample()).await.unwrap();
        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, sample());

        store.save_all(&loaded).await.unwrap();
        assert_eq!(store.load_all().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn legacy_file_loads_with_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"[{"id": 4, "author": "Ada", "title": "Old", "content": "Before likes"}]"#,
        )
        .unwrap();

        let posts = store.load_all().await.unwrap();
        assert_eq!(posts[0].likes, 0);
        assert_eq!(posts[0].created_at, None);
    }

    #[tokio::test]
    async fn output_is_indented_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save_all(&sample()).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"id\": 1,"));
        assert!(text.ends_with("]\n"));
        assert!(!text.contains("\"created_at\": null"));

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn failed_save_is_unavailable_not_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePostStore::new(dir.path().join("missing").join("posts.json"));

        let err = store.save_all(&sample()).await.unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn initialize_keeps_existing_data_unless_forced() {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePostStore::new(dir.path().join("data").join("posts.json"));

        assert!(store.initialize(false).await.unwrap());
        assert!(store.load_all().await.unwrap().is_empty());

        store.save_all(&sample()).await.unwrap();
        assert!(!store.initialize(false).await.unwrap());
        assert_eq!(store.load_all().await.unwrap().len(), 2);

        assert!(store.initialize(true).await.unwrap());
        assert!(store.load_all().await.unwrap().is_empty());
    }
}
