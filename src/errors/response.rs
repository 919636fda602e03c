use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::errors::AppError;

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
// Auth failures key their body on "message", task failures on "error" -- the
// two resource groups use different envelopes and clients rely on both.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": msg })),
            )
                .into_response(),

            // Duplicate signup is reported as 400, not 409, per the wire contract
            AppError::Conflict(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": msg })),
            )
                .into_response(),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": msg })),
            )
                .into_response(),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": msg })),
            )
                .into_response(),

            // Store errors are internal server errors, underlying message passed through
            AppError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response(),
        }
    }
}
