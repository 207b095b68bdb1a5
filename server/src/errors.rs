use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use tally_core::ValidationErrorBody;

/// Fatal startup/runtime errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("missing environment variable {1}")]
    EnvError(#[source] std::env::VarError, String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serve: {0}")]
    CannotServe(std::io::Error),
    #[error("{0}")]
    Internal(String),
}

/// Per-request errors, mapped onto the wire shapes the console consumes.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{}", .0.message)]
    Unprocessable(ValidationErrorBody),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type RestResult<T> = Result<T, RestError>;

impl From<rusqlite::Error> for RestError {
    fn from(e: rusqlite::Error) -> Self {
        RestError::Internal(e.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match self {
            RestError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("{} not found", what) })),
            )
                .into_response(),
            RestError::Unprocessable(body) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            RestError::Internal(message) => {
                tracing::error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
