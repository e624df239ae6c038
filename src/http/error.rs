use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::app::error::ServiceError;

/// Error payload shape shared by every failing endpoint:
/// `{result: false, error_type, error_message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error_type: &'static str,
    error_message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    result: bool,
    error_type: &'static str,
    error_message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error_type: "BadRequest",
            error_message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error_type: "Unauthorized",
            error_message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error_type: "StorageFailure",
            error_message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Storage(cause) => {
                tracing::error!(error = %cause, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            error_type: err.kind(),
            error_message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            result: false,
            error_type: self.error_type,
            error_message: self.error_message,
        });
        (self.status, body).into_response()
    }
}
