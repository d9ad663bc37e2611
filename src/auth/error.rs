use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::auth::dto::ErrorResponse;

/// Failures the auth endpoints report to callers.
///
/// Callers only ever see a status and a fixed message; the underlying cause
/// is logged where it happens and dropped before this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The new user row could not be written, whatever the reason.
    #[error("User registration failed.")]
    Registration,
    /// No stored user matched the supplied username and password.
    #[error("Invalid username or password.")]
    InvalidCredentials,
    /// The credential lookup itself failed.
    #[error("Login failed.")]
    Lookup,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Registration => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Lookup => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
