use contracts::domain::a002_user::{UserDetail, UsersResponse};
use contracts::domain::common::ModerationRequest;
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::query_cache::QueryKey;
use serde::de::IgnoredAny;

use crate::shared::api_utils::path_segment;
use crate::shared::http;

pub fn users_root() -> QueryKey {
    QueryKey::root("users")
}

pub fn list_key(query: &ListQuery) -> QueryKey {
    users_root().child("list").child(query.cache_key_fragment())
}

pub fn detail_key(id: &str) -> QueryKey {
    users_root().child("detail").child(id)
}

/// `GET /api/admin/users` (search, status, is_admin, limit, offset)
pub async fn fetch_users(query: &ListQuery) -> Result<UsersResponse, ApiError> {
    http::get_json_with_query("/api/admin/users", &query.to_offset_pairs()).await
}

pub async fn fetch_user(id: &str) -> Result<UserDetail, ApiError> {
    http::get_json(&format!("/api/admin/users/{}", path_segment(id))).await
}

/// Suspend/activate через PATCH, удаление через DELETE с причиной в теле
pub async fn moderate_user(id: String, request: ModerationRequest) -> Result<(), ApiError> {
    let base = format!("/api/admin/users/{}", path_segment(&id));
    match request.action().path_segment() {
        Some(segment) => {
            let path = format!("{}/{}", base, segment);
            http::patch_json::<_, IgnoredAny>(&path, &request).await?;
        }
        None => {
            http::delete_json::<_, IgnoredAny>(&base, Some(&request)).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_share_users_prefix() {
        let root = users_root();
        assert!(list_key(&ListQuery::default()).starts_with(&root));
        assert!(detail_key("u1").starts_with(&root));
        assert!(!detail_key("u1").starts_with(&QueryKey::root("teams")));
    }

    #[test]
    fn test_activate_body_is_empty_object() {
        let body = serde_json::to_string(&ModerationRequest::Activate { notes: None }).unwrap();
        assert_eq!(body, "{}");
    }
}
