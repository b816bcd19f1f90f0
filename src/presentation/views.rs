use crate::{
    application::error::HttpError,
    domain::entities::PostRecord,
    presentation::format::format_date,
};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

/// Page furniture shared by every view.
#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
}

impl LayoutChrome {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            brand: BrandView {
                title: site_title.into(),
                href: "/".to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PostCard {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: String,
    pub likes: u64,
}

impl From<&PostRecord> for PostCard {
    fn from(record: &PostRecord) -> Self {
        let raw = record.created_at.as_deref().unwrap_or_default();
        let created = format_date(raw).unwrap_or_else(|err| {
            warn!(
                target = "masthead::presentation",
                id = record.id,
                error = %err,
                "unreadable post timestamp; showing it blank"
            );
            String::new()
        });

        Self {
            id: record.id,
            author: record.author.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            created,
            likes: record.likes,
        }
    }
}

pub struct PostListView {
    pub posts: Vec<PostCard>,
}

impl PostListView {
    pub fn from_records(records: &[PostRecord]) -> Self {
        Self {
            posts: records.iter().map(PostCard::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<PostListView>,
}

/// Values for the shared add/edit form.
pub struct PostFormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub author: String,
    pub title: String,
    pub content: String,
}

impl PostFormView {
    pub fn blank() -> Self {
        Self {
            heading: "Write a post",
            submit_label: "Publish",
            action: "/add".to_string(),
            author: String::new(),
            title: String::new(),
            content: String::new(),
        }
    }

    pub fn edit(record: &PostRecord) -> Self {
        Self {
            heading: "Edit post",
            submit_label: "Save changes",
            action: format!("/update/{}", record.id),
            author: record.author.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub view: LayoutContext<PostFormView>,
}
