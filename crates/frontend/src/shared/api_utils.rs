//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Адрес бэкенда по умолчанию (локальный dev-сервер)
pub const DEFAULT_API_BASE: &str = "http://localhost:3001";

/// Get the base URL for API requests
///
/// Берётся из переменной окружения `CANCHEADOS_API_URL` во время сборки.
/// Завершающий `/` отбрасывается.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/api/admin/disputes/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    normalize_base(option_env!("CANCHEADOS_API_URL"))
}

fn normalize_base(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Кодирует идентификатор для подстановки в путь
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(None), DEFAULT_API_BASE);
        assert_eq!(normalize_base(Some("  ")), DEFAULT_API_BASE);
        assert_eq!(
            normalize_base(Some("https://api.cancheados.com/")),
            "https://api.cancheados.com"
        );
    }

    #[test]
    fn test_path_segment_escapes() {
        assert_eq!(path_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(path_segment("42"), "42");
    }
}
