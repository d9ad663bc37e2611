use serde::{Deserialize, Serialize};

/// Request body for signup.
///
/// Every field is optional on purpose: values are handed to the store as
/// given, and the store's declared shape decides what is required.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body returned after a successful signup or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: &'static str,
    pub user_id: i64,
}

/// Body carried by every error status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
