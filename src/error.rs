//! Error taxonomy for the page manager.
//!
//! Missing translations are deliberately *not* errors: entity-level lookups
//! resolve absent language keys to empty values or a fallback-view reference.
//! Only registry misconfiguration, unknown templates and store-level
//! not-found conditions propagate as errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No page templates are registered; the form cannot be rendered at all.
    #[error("no page templates are registered")]
    NoTemplates,

    /// A template name was supplied but no handler is registered for it.
    /// Composing a partial form would hide the integration defect, so this
    /// aborts instead.
    #[error("unknown page template '{0}'")]
    UnknownTemplate(String),

    #[error("page {0} not found")]
    PageNotFound(i64),

    #[error("language {0} not found")]
    LanguageNotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A persisted language-map column failed to round-trip through JSON.
    #[error("stored column is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp in stored row: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::PageNotFound(_) | Error::LanguageNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::UnknownTemplate(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NoTemplates => {
                tracing::error!("configuration error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            Error::Database(_) | Error::Serialization(_) | Error::Timestamp(_) | Error::Io(_) => {
                tracing::error!("internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
