use thiserror::Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors of the http listing surface, wraps `anyhow::Error`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// a generic error
    #[error("generic: {0}")]
    Err(#[from] anyhow::Error),
    /// An http status
    #[error("status code {0}")]
    Status(StatusCode),
}

// Tell axum how to convert `ApiError` into a response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Err(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Something went wrong: {e}"))
                    .into_response()
            }
            Self::Status(sc) => sc.into_response(),
        }
    }
}

// Lets handlers use `?` on `Result<_, StatusCode>`.
impl From<StatusCode> for ApiError {
    fn from(sc: StatusCode) -> Self {
        Self::Status(sc)
    }
}
