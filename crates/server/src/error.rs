use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use casting_core::{AuthError, Error};

/// Unified API error type rendered as `{"success": false, "error": <status>, "message": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Auth failure tag, only set for 401s
    pub code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad request")
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "resource not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    }

    pub fn unprocessable() -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "request cannot be processed",
        )
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    /// Maps a failed create or update. Anything other than a missing row is unprocessable.
    pub fn from_write(err: Error) -> Self {
        match err {
            Error::NotFound => Self::not_found(),
            Error::Validation(ref reason) => {
                tracing::debug!(%reason, "Rejected record input");
                Self::unprocessable()
            }
            err => {
                tracing::error!(error = %err, "Store write failed");
                Self::unprocessable()
            }
        }
    }

    /// Maps a failed delete. Anything other than a missing row is reported as 405.
    pub fn from_delete(err: Error) -> Self {
        match err {
            Error::NotFound => Self::not_found(),
            err => {
                tracing::error!(error = %err, "Store delete failed");
                Self::method_not_allowed()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "error": self.status.as_u16(),
            "message": self.message,
        });
        if let Some(code) = self.code {
            body["code"] = json!(code);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);
        Self {
            status,
            message: err.to_string(),
            code: Some(err.code()),
        }
    }
}

/// Convert from core service errors to API errors
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Auth(auth) => auth.into(),
            Error::NotFound => Self::not_found(),
            Error::Validation(_) => Self::unprocessable(),
            err => {
                tracing::error!(error = %err, "Request failed");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        Self::unprocessable()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected path parameter");
        Self::bad_request()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
