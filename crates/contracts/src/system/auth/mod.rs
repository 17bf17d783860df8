use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::api_error::ApiError;

pub const LOGIN_ROUTE: &str = "/login";
pub const AUTH_API_PREFIX: &str = "/api/auth/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Result<Self, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Пользователь сессии. Старые версии бэкенда присылали `id` вместо `userId`;
/// для входа важен только `is_admin`, остальные поля могут отсутствовать.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default, rename = "userId", alias = "id")]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        [self.nombre.as_deref(), Some(self.email.as_str())]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .unwrap_or("Admin")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(default, rename = "refreshToken", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Ответ `POST /api/auth/login`: токен либо в `token`, либо в `tokens.accessToken`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenPair>,
    pub user: AuthUser,
}

impl LoginResponse {
    pub fn access_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or_else(|| self.tokens.as_ref().map(|t| t.access_token.as_str()))
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Access denied: Admin privileges required")]
    AdminRequired,

    #[error("Login response did not contain an access token")]
    MissingToken,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Активная сессия администратора
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

impl Session {
    /// Восстановление из хранилища. `None` означает: очистить хранилище.
    pub fn restore(token: Option<String>, user: Option<AuthUser>) -> Option<Self> {
        match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() && user.is_admin => {
                Some(Self { token, user })
            }
            _ => None,
        }
    }

    pub fn from_login(response: LoginResponse) -> Result<Self, AuthError> {
        if !response.user.is_admin {
            return Err(AuthError::AdminRequired);
        }
        let token = response
            .access_token()
            .ok_or(AuthError::MissingToken)?
            .to_string();
        Ok(Self {
            token,
            user: response.user,
        })
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Реакция HTTP-слоя на 401/403
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedPolicy {
    ClearSessionAndRedirect,
    LogOnly,
    Forbidden,
    Ignore,
}

impl UnauthorizedPolicy {
    /// Сессия сбрасывается только при 401 от `/api/auth/*` вне страницы входа.
    /// 401 от остальных эндпоинтов лишь логируется.
    pub fn decide(status: u16, request_path: &str, current_route: &str) -> Self {
        match status {
            401 => {
                let path = strip_origin(request_path);
                if path.starts_with(AUTH_API_PREFIX) && current_route != LOGIN_ROUTE {
                    Self::ClearSessionAndRedirect
                } else {
                    Self::LogOnly
                }
            }
            403 => Self::Forbidden,
            _ => Self::Ignore,
        }
    }
}

fn strip_origin(url: &str) -> &str {
    match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.find('/').map(|p| &rest[p..]).unwrap_or("/")
        }
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(is_admin: bool) -> AuthUser {
        AuthUser {
            user_id: "u1".into(),
            email: "admin@cancheados.com".into(),
            nombre: None,
            is_admin,
        }
    }

    #[test]
    fn test_restore_admin_session() {
        let s = Session::restore(Some("abc".into()), Some(admin(true))).unwrap();
        assert_eq!(s.bearer(), "Bearer abc");
        assert!(Session::restore(Some("abc".into()), Some(admin(false))).is_none());
        assert!(Session::restore(None, Some(admin(true))).is_none());
        assert!(Session::restore(Some("abc".into()), None).is_none());
    }

    #[test]
    fn test_login_rejects_non_admin() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"token":"t","user":{"userId":"u2","email":"p@x.com","is_admin":false}}"#,
        )
        .unwrap();
        let err = Session::from_login(resp).unwrap_err();
        assert!(err.to_string().contains("Admin privileges required"));
    }

    #[test]
    fn test_login_accepts_nested_token() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"tokens":{"accessToken":"nested"},"user":{"id":"u1","email":"a@x.com","nombre":"Ana","is_admin":true}}"#,
        )
        .unwrap();
        let session = Session::from_login(resp).unwrap();
        assert_eq!(session.token, "nested");
        assert_eq!(session.user.user_id, "u1");
        assert_eq!(session.user.display_name(), "Ana");
    }

    #[test]
    fn test_login_without_token() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"user":{"userId":"u1","email":"a@x.com","is_admin":true}}"#)
                .unwrap();
        assert_eq!(Session::from_login(resp), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_unauthorized_policy() {
        assert_eq!(
            UnauthorizedPolicy::decide(401, "/api/admin/users", "/"),
            UnauthorizedPolicy::LogOnly
        );
        assert_eq!(
            UnauthorizedPolicy::decide(401, "http://localhost:3001/api/auth/me", "/"),
            UnauthorizedPolicy::ClearSessionAndRedirect
        );
        assert_eq!(
            UnauthorizedPolicy::decide(401, "/api/auth/login", LOGIN_ROUTE),
            UnauthorizedPolicy::LogOnly
        );
        assert_eq!(
            UnauthorizedPolicy::decide(403, "/api/admin/users", "/"),
            UnauthorizedPolicy::Forbidden
        );
        assert_eq!(
            UnauthorizedPolicy::decide(500, "/api/auth/me", "/"),
            UnauthorizedPolicy::Ignore
        );
    }

    #[test]
    fn test_restore_minimal_stored_user() {
        let user: AuthUser = serde_json::from_str(r#"{"is_admin":true}"#).unwrap();
        let session = Session::restore(Some("abc".into()), Some(user)).unwrap();
        assert_eq!(session.token, "abc");
        assert!(session.user.user_id.is_empty());
        assert_eq!(session.user.display_name(), "Admin");
    }

    #[test]
    fn test_login_minimal_non_admin_user() {
        let resp: LoginResponse = serde_json::from_str(r#"{"user":{"is_admin":false}}"#).unwrap();
        let err = Session::from_login(resp).unwrap_err();
        assert_eq!(err, AuthError::AdminRequired);
        assert!(err.to_string().contains("Admin privileges required"));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = admin(true);
        assert_eq!(user.display_name(), "admin@cancheados.com");
        user.nombre = Some("  ".into());
        assert_eq!(user.display_name(), "admin@cancheados.com");
    }

    #[test]
    fn test_stored_user_roundtrip_uses_user_id() {
        let json = serde_json::to_value(admin(true)).unwrap();
        assert_eq!(json["userId"], "u1");
    }
}
