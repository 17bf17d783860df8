use contracts::shared::api_error::ApiError;
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::http;

/// Login with email and password
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    http::post_public_json("/api/auth/login", request).await
}

/// Logout (server side bookkeeping only; the token is dropped locally anyway)
pub async fn logout() -> Result<serde_json::Value, ApiError> {
    http::post_json("/api/auth/logout", &serde_json::json!({})).await
}
