//! Pure operations over the full post collection.
//!
//! Every function works on an already-loaded collection; loading and saving
//! belong to the store.

use std::collections::HashSet;

use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use super::{
    entities::{PostDraft, PostRecord},
    error::DomainError,
};

pub const ENTITY: &str = "post";

/// Layout of `created_at` on disk, e.g. `2024-01-05 15:45:00`.
pub const STORED_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Long-form layout shown to readers, e.g. `January 05, 2024 at 03:45 PM`.
pub const DISPLAY_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:long] [day], [year] at [hour repr:12]:[minute] [period]"
);

/// Next free id: one past the largest id in use, or 1 for an empty collection.
pub fn next_id(posts: &[PostRecord]) -> Result<u64, DomainError> {
    match posts.iter().map(|post| post.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("post id space exhausted")),
    }
}

pub fn find(posts: &[PostRecord], id: u64) -> Option<&PostRecord> {
    posts.iter().find(|post| post.id == id)
}

/// Render a creation time in the stored layout.
pub fn stamp(at: PrimitiveDateTime) -> Result<String, DomainError> {
    at.format(STORED_TIMESTAMP_FORMAT)
        .map_err(|err| DomainError::invariant(format!("failed to stamp creation time: {err}")))
}

/// Build a fresh record for `draft` and append it to the collection.
pub fn append_new(
    posts: &mut Vec<PostRecord>,
    draft: PostDraft,
    created_at: PrimitiveDateTime,
) -> Result<PostRecord, DomainError> {
    let PostDraft {
        author,
        title,
        content,
    } = draft;

    let record = PostRecord {
        id: next_id(posts)?,
        author,
        title,
        content,
        created_at: Some(stamp(created_at)?),
        likes: 0,
    };
    posts.push(record.clone());
    Ok(record)
}

/// Replace author, title and content of the post with `id`.
pub fn apply_update(
    posts: &mut [PostRecord],
    id: u64,
    draft: PostDraft,
) -> Result<&PostRecord, DomainError> {
    let post = posts
        .iter_mut()
        .find(|post| post.id == id)
        .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

    post.author = draft.author;
    post.title = draft.title;
    post.content = draft.content;
    Ok(post)
}

/// Drop the post with `id`, returning whether anything was removed.
pub fn remove(posts: &mut Vec<PostRecord>, id: u64) -> bool {
    let before = posts.len();
    posts.retain(|post| post.id != id);
    posts.len() != before
}

/// Add one like to the post with `id` and return the new count.
pub fn increment_likes(posts: &mut [PostRecord], id: u64) -> Result<u64, DomainError> {
    let post = posts
        .iter_mut()
        .find(|post| post.id == id)
        .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

    post.likes = post.likes.saturating_add(1);
    Ok(post.likes)
}

pub fn ensure_unique_ids(posts: &[PostRecord]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(posts.len());
    for post in posts {
        if !seen.insert(post.id) {
            return Err(DomainError::invariant(format!(
                "post id {} appears more than once",
                post.id
            )));
        }
    }
    Ok(())
}
