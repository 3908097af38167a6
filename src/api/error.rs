//! Mapping from resolver errors to HTTP responses.
//!
//! Every error kind has a stable `kind` string and status code. Storage failures are logged in
//! full and replaced by a fixed message so driver text never reaches clients. Malformed bodies
//! get the same treatment, so serde's parser messages stay out of responses.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// An error returned from the `/graph` handler.
pub enum ApiError {
    /// The resolver rejected the operation
    Resolve(Error),
    /// The root field names no known operation
    UnknownField(String),
    /// The body was not JSON or did not have the `{field, arguments}` shape
    BadRequest(JsonRejection),
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self::Resolve(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    kind: &'static str,
    message: String,
}

fn classify(err: Error) -> (StatusCode, &'static str, String) {
    match err {
        Error::MissingArgument { .. } => (StatusCode::BAD_REQUEST, "missing_argument", err.to_string()),
        Error::ArgumentType { .. } => (StatusCode::BAD_REQUEST, "argument_type", err.to_string()),
        Error::InvalidIdentifier { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_identifier",
            err.to_string(),
        ),
        Error::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
        Error::Storage(db_err) => {
            tracing::error!("storage error: {db_err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage",
                "storage failure".to_string(),
            )
        }
        other => {
            tracing::error!("internal error: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Self::Resolve(err) => classify(err),
            Self::UnknownField(field) => (
                StatusCode::BAD_REQUEST,
                "unknown_field",
                format!("Unknown field: {field}"),
            ),
            Self::BadRequest(rejection) => {
                tracing::debug!("rejected request body: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    "bad_request",
                    "request body must be a JSON object with a string `field` and an object `arguments`"
                        .to_string(),
                )
            }
        };
        let body = ErrorBody {
            error: ErrorDetail { kind, message },
        };
        (status, Json(body)).into_response()
    }
}
