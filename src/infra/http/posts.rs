//! Handlers for listing, writing, editing, deleting and liking posts.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::{
    application::error::HttpError,
    presentation::views::{
        IndexTemplate, LayoutContext, PostFormTemplate, PostFormView, PostListView,
        render_template_response,
    },
};

use super::{HttpState, forms::PostForm};

const LISTING: &str = "/";

pub(crate) async fn list_posts(State(state): State<HttpState>) -> Response {
    match state.posts.list().await {
        Ok(records) => {
            let view = LayoutContext::new(
                state.chrome.clone(),
                PostListView::from_records(&records),
            );
            render_template_response(IndexTemplate { view }, StatusCode::OK)
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(crate) async fn show_add_form(State(state): State<HttpState>) -> Response {
    let view = LayoutContext::new(state.chrome.clone(), PostFormView::blank());
    render_template_response(PostFormTemplate { view }, StatusCode::OK)
}

pub(crate) async fn add_post(
    State(state): State<HttpState>,
    form: PostForm,
) -> Result<Redirect, HttpError> {
    state.posts.create(form.into()).await?;
    Ok(Redirect::to(LISTING))
}

pub(crate) async fn show_update_form(
    State(state): State<HttpState>,
    Path(id): Path<u64>,
) -> Response {
    match state.posts.find_by_id(id).await {
        Ok(record) => {
            let view = LayoutContext::new(state.chrome.clone(), PostFormView::edit(&record));
            render_template_response(PostFormTemplate { view }, StatusCode::OK)
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(crate) async fn update_post(
    State(state): State<HttpState>,
    Path(id): Path<u64>,
    form: PostForm,
) -> Result<Redirect, HttpError> {
    state.posts.update(id, form.into()).await?;
    Ok(Redirect::to(LISTING))
}

pub(crate) async fn delete_post(
    State(state): State<HttpState>,
    Path(id): Path<u64>,
) -> Result<Redirect, HttpError> {
    state.posts.remove(id).await?;
    Ok(Redirect::to(LISTING))
}

/// Liking an unknown post is a silent no-op, like deleting one.
pub(crate) async fn like_post(
    State(state): State<HttpState>,
    Path(id): Path<u64>,
) -> Result<Redirect, HttpError> {
    match state.posts.increment_likes(id).await {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            debug!(target = "masthead::http::posts", id, "like for unknown post ignored");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(Redirect::to(LISTING))
}

pub(crate) async fn fallback(uri: Uri) -> HttpError {
    HttpError::new(
        "infra::http::posts::fallback",
        StatusCode::NOT_FOUND,
        "Not found",
        format!("no route for `{}`", uri.path()),
    )
}
