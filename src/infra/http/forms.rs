use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
};
use url::form_urlencoded;

use crate::domain::entities::PostDraft;

/// Fields submitted by the add and edit forms.
///
/// The body is decoded as urlencoded whatever its declared content type.
/// Missing fields arrive as empty strings, unknown keys are ignored and the
/// first occurrence of a repeated key wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PostForm {
    pub(crate) author: String,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl PostForm {
    pub(crate) fn from_urlencoded(body: &[u8]) -> Self {
        let mut author = None;
        let mut title = None;
        let mut content = None;

        for (key, value) in form_urlencoded::parse(body) {
            let slot = match &*key {
                "author" => &mut author,
                "title" => &mut title,
                "content" => &mut content,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            author: author.unwrap_or_default(),
            title: title.unwrap_or_default(),
            content: content.unwrap_or_default(),
        }
    }
}

impl<S> FromRequest<S> for PostForm
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        Ok(Self::from_urlencoded(&body))
    }
}

impl From<PostForm> for PostDraft {
    fn from(form: PostForm) -> Self {
        PostDraft {
            author: form.author,
            title: form.title,
            content: form.content,
        }
    }
}
