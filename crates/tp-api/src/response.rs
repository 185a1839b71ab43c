//! # Response envelope and error mapping
//!
//! Every endpoint answers with the same JSON envelope:
//! `{"success": true, "message": ..., "data": ...}` on success,
//! `{"success": false, "message": ..., "errors": ...}` on failure.
//!
//! Handlers return `Result<Response, ApiError>`; the `IntoResponse` impl on
//! `ApiError` is the single place where domain failures turn into transport
//! status codes, so nothing ever escapes as a bare framework error page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use tp_core::error::AppError;

pub struct ApiResponse;

impl ApiResponse {
    /// `200 {"success": true, "message": "Success", "data": <data>}`
    pub fn success<T: Serialize>(data: T) -> Response {
        Self::success_with(data, "Success", StatusCode::OK)
    }

    pub fn success_with<T: Serialize>(data: T, message: &str, status: StatusCode) -> Response {
        let body = json!({
            "success": true,
            "message": message,
            "data": data,
        });
        (status, Json(body)).into_response()
    }

    /// `{"success": false, "message": <message>, "errors": <errors|null>}`
    pub fn error(message: &str, status: StatusCode, errors: Option<Value>) -> Response {
        let body = json!({
            "success": false,
            "message": message,
            "errors": errors,
        });
        (status, Json(body)).into_response()
    }
}

/// Transport-facing wrapper around the domain error. Exists so handler
/// bodies can use `?` on repo and auth results.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    /// Ordered classification, first match wins:
    /// not-found 404, validation 400, unauthenticated 401 (message
    /// normalized), forbidden 403, conflict 409, everything else 500.
    fn into_response(self) -> Response {
        match self.0 {
            err @ AppError::NotFound(..) => {
                ApiResponse::error(&err.to_string(), StatusCode::NOT_FOUND, None)
            }
            AppError::Validation(detail) => ApiResponse::error(
                "Validation error",
                StatusCode::BAD_REQUEST,
                Some(serde_json::to_value(&detail).unwrap_or(Value::Null)),
            ),
            AppError::Unauthorized(reason) => {
                // The client always sees the same fixed message, whatever
                // the actual cause was.
                tracing::debug!("authentication rejected: {reason}");
                ApiResponse::error("Authentication invalid.", StatusCode::UNAUTHORIZED, None)
            }
            err @ AppError::Forbidden(_) => {
                ApiResponse::error(&err.to_string(), StatusCode::FORBIDDEN, None)
            }
            err @ AppError::Conflict(_) => {
                ApiResponse::error(&err.to_string(), StatusCode::CONFLICT, None)
            }
            err @ AppError::Internal(_) => {
                tracing::error!("handler failed: {err}");
                // The raw error text is echoed to the client here. Known
                // weakness, kept for wire compatibility.
                ApiResponse::error(&err.to_string(), StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        }
    }
}

pub type ApiResult = Result<Response, ApiError>;
