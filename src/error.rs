//! Errors raised by page handlers and storage queries.
//!
//! Page routes render these as an HTML error page. The pricing API wraps them
//! in its own JSON error type instead.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            other => AppError::Database(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the visitor; internals stay in the log
    fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound => "We couldn't find that page or record.",
            AppError::Database(_) => "The database is unavailable. Please try again shortly.",
            AppError::Template(_) => "This page failed to render.",
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    code: u16,
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let page = ErrorTemplate {
            code: status.as_u16(),
            message: self.public_message(),
        };

        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Error page failed to render: {}", e);
                (status, self.public_message()).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
