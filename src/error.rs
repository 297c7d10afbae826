//! Handler errors and their JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::users::dto::{MessageResponse, Violation};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be decoded into the create payload.
    #[error("Request failed: {0}")]
    MalformedBody(String),
    #[error("validation failed on {} field(s)", .0.len())]
    Violations(Vec<Violation>),
    /// A downstream step failed; the cause is echoed in `data`.
    #[error("{message}: {cause}")]
    Downstream { message: &'static str, cause: String },
    #[error("{message}")]
    Status {
        status: StatusCode,
        message: &'static str,
    },
}

impl ApiError {
    pub fn status(status: StatusCode, message: &'static str) -> Self {
        Self::Status { status, message }
    }

    pub fn downstream(message: &'static str, cause: impl ToString) -> Self {
        Self::Downstream {
            message,
            cause: cause.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: &'static str,
    data: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedBody(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(MessageResponse {
                    message: "Request failed",
                }),
            )
                .into_response(),
            ApiError::Violations(v) => (StatusCode::BAD_REQUEST, Json(v)).into_response(),
            ApiError::Downstream { message, cause } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    status: "error",
                    message,
                    data: cause,
                }),
            )
                .into_response(),
            ApiError::Status { status, message } => {
                (status, Json(MessageResponse { message })).into_response()
            }
        }
    }
}
