//! HTTP-клиент админского REST API.
//!
//! Все запросы идут через [`send`]: подставляет `Authorization: Bearer`,
//! ограничивает время ответа и превращает не-2xx ответы в [`ApiError`].
//! 401 от `/api/auth/*` сбрасывает сессию (событие [`SESSION_EXPIRED_EVENT`]),
//! остальные 401 и 403 только логируются.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use contracts::shared::api_error::ApiError;
use contracts::system::auth::UnauthorizedPolicy;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{window, AbortController, RequestCache};

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Событие на `window`, которое слушает `AuthProvider`
pub const SESSION_EXPIRED_EVENT: &str = "cancheados:session-expired";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Эндпоинт админки: без токена запрос не отправляется
    Required,
    /// Вход в систему и статические файлы
    None,
}

/// `path?k=v&...`; пустые параметры не добавляют `?`
pub fn with_query(path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let map: BTreeMap<&str, &str> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let qs = serde_qs::to_string(&map).unwrap_or_default();
    if qs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, qs)
    }
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

fn current_route() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn notify_session_expired() {
    storage::clear_session();
    if let Some(w) = window() {
        if let Ok(event) = web_sys::Event::new(SESSION_EXPIRED_EVENT) {
            let _ = w.dispatch_event(&event);
        }
    }
}

fn apply_unauthorized_policy(status: u16, url: &str, err: &ApiError) {
    match UnauthorizedPolicy::decide(status, url, &current_route()) {
        UnauthorizedPolicy::ClearSessionAndRedirect => {
            log::warn!("Session rejected by {}, signing out", url);
            notify_session_expired();
        }
        UnauthorizedPolicy::LogOnly => {
            log::warn!("401 from {}: {}", url, err);
        }
        UnauthorizedPolicy::Forbidden => {
            log::warn!("Insufficient privileges for {}: {}", url, err);
        }
        UnauthorizedPolicy::Ignore => {}
    }
}

async fn send<T: DeserializeOwned>(
    method: Method,
    url: String,
    body: Option<String>,
    auth: Auth,
    cache: Option<RequestCache>,
) -> Result<T, ApiError> {
    let mut request = builder(method, &url).header("Accept", "application/json");

    if auth == Auth::Required {
        let bearer = storage::bearer().ok_or(ApiError::NotAuthenticated)?;
        request = request.header("Authorization", &bearer);
    }
    if let Some(cache) = cache {
        request = request.cache(cache);
    }

    let controller =
        AbortController::new().map_err(|_| ApiError::Network("AbortController unavailable".into()))?;
    request = request.abort_signal(Some(&controller.signal()));

    let request = match body {
        Some(json) => request
            .header("Content-Type", "application/json")
            .body(json),
        None => request.build(),
    }
    .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?;

    // Таймер снимается при выходе из функции (drop)
    let timed_out = Rc::new(Cell::new(false));
    let _timer = {
        let timed_out = timed_out.clone();
        let controller = controller.clone();
        Timeout::new((REQUEST_TIMEOUT_SECS * 1000) as u32, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let transport_error = |e: gloo_net::Error| {
        if timed_out.get() {
            ApiError::Timeout(REQUEST_TIMEOUT_SECS)
        } else {
            ApiError::Network(e.to_string())
        }
    };

    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    let text = response.text().await.map_err(transport_error)?;

    if !response.ok() {
        let err = ApiError::from_status(status, &text);
        apply_unauthorized_policy(status, &url, &err);
        log::debug!("{:?} {} -> {}: {}", method, url, status, err);
        return Err(err);
    }

    // Пустое тело (204 и т.п.) разбирается как JSON null
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str::<T>(text).map_err(|e| {
        log::error!("Unexpected response shape from {}: {}", url, e);
        ApiError::Decode(e.to_string())
    })
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body)
        .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))
}

// ============================================================================
// Public API
// ============================================================================

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(Method::Get, api_url(path), None, Auth::Required, None).await
}

pub async fn get_json_with_query<T: DeserializeOwned>(
    path: &str,
    pairs: &[(String, String)],
) -> Result<T, ApiError> {
    get_json(&with_query(path, pairs)).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    send(
        Method::Post,
        api_url(path),
        Some(encode(body)?),
        Auth::Required,
        None,
    )
    .await
}

/// POST без токена (вход в систему)
pub async fn post_public_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    send(Method::Post, api_url(path), Some(encode(body)?), Auth::None, None).await
}

pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    send(
        Method::Patch,
        api_url(path),
        Some(encode(body)?),
        Auth::Required,
        None,
    )
    .await
}

/// PATCH без тела (activate)
pub async fn patch_empty<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(Method::Patch, api_url(path), None, Auth::Required, None).await
}

pub async fn delete_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: Option<&B>,
) -> Result<T, ApiError> {
    let body = body.map(encode).transpose()?;
    send(Method::Delete, api_url(path), body, Auth::Required, None).await
}

/// Статический JSON с того же хоста, что и фронтенд, в обход HTTP-кэша
pub async fn get_static_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send(
        Method::Get,
        path.to_string(),
        None,
        Auth::None,
        Some(RequestCache::NoStore),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_with_query_empty() {
        assert_eq!(with_query("/api/admin/users", &[]), "/api/admin/users");
    }

    #[test]
    fn test_with_query_encodes_values() {
        let url = with_query(
            "/api/admin/users",
            &pairs(&[("search", "ana maria"), ("limit", "20"), ("offset", "40")]),
        );
        assert!(url.starts_with("/api/admin/users?"));
        assert!(url.contains("limit=20"));
        assert!(url.contains("offset=40"));
        assert!(url.contains("search=ana+maria") || url.contains("search=ana%20maria"));
    }
}
