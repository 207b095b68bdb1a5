use thiserror::Error;

use crate::envelope::ValidationErrorBody;

/// Everything that can go wrong between the client and the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status other than 422.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A 422 with structured per-field errors.
    #[error("{}", .0.message)]
    Validation(ValidationErrorBody),

    /// The response body did not match the expected shape.
    #[error("could not decode server response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The structured field errors, when this failure carries them.
    pub fn validation(&self) -> Option<&ValidationErrorBody> {
        match self {
            ApiError::Validation(body) => Some(body),
            _ => None,
        }
    }
}
