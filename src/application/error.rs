use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    application::{posts::PostServiceError, repos::StoreError},
    config::LoadError,
    domain::error::DomainError,
    infra::error::InfraError,
};

pub const POST_NOT_FOUND_MESSAGE: &str = "Post not found";

#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

/// An error response with a short plain-text body and a detailed report for
/// the response logger.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn new(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        let report = ErrorReport::from_message(source, status, detail);
        Self {
            status,
            public_message,
            report,
        }
    }

    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            report,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

impl From<PostServiceError> for HttpError {
    fn from(error: PostServiceError) -> Self {
        const SOURCE: &str = "application::error::post_service_error";

        match &error {
            PostServiceError::Domain(DomainError::NotFound { .. }) => HttpError::from_error(
                SOURCE,
                StatusCode::NOT_FOUND,
                POST_NOT_FOUND_MESSAGE,
                &error,
            ),
            PostServiceError::Domain(DomainError::Invariant { .. }) => HttpError::from_error(
                SOURCE,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected error occurred",
                &error,
            ),
            PostServiceError::Store(StoreError::StorageUnavailable { .. }) => {
                HttpError::from_error(
                    SOURCE,
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Post storage is unavailable",
                    &error,
                )
            }
            PostServiceError::Store(StoreError::CorruptData { .. }) => HttpError::from_error(
                SOURCE,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Stored posts could not be read",
                &error,
            ),
        }
    }
}

/// Fatal errors surfaced by the binary before or while serving.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
