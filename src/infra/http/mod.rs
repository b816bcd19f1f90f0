mod forms;
mod middleware;
mod posts;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use crate::{application::posts::PostService, presentation::views::LayoutChrome};

pub use middleware::RequestContext;

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub chrome: LayoutChrome,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(posts::list_posts))
        .route("/add", get(posts::show_add_form).post(posts::add_post))
        .route(
            "/update/{id}",
            get(posts::show_update_form).post(posts::update_post),
        )
        .route(
            "/delete/{id}",
            get(posts::delete_post).post(posts::delete_post),
        )
        .route("/like/{id}", post(posts::like_post))
        .fallback(posts::fallback)
        .with_state(state)
        .layer(from_fn(middleware::log_responses))
        .layer(from_fn(middleware::set_request_context))
}
