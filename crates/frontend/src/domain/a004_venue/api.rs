use contracts::domain::a004_venue::{Venue, VenuesResponse};
use contracts::domain::common::ModerationRequest;
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::query_cache::QueryKey;
use serde::de::IgnoredAny;

use crate::shared::api_utils::path_segment;
use crate::shared::http;

pub fn venues_root() -> QueryKey {
    QueryKey::root("venues")
}

pub fn list_key(query: &ListQuery) -> QueryKey {
    venues_root().child("list").child(query.cache_key_fragment())
}

pub fn detail_key(id: &str) -> QueryKey {
    venues_root().child("detail").child(id)
}

/// `GET /api/admin/venues` (search, verified, suspended, limit, offset)
pub async fn fetch_venues(query: &ListQuery) -> Result<VenuesResponse, ApiError> {
    http::get_json_with_query("/api/admin/venues", &query.to_offset_pairs()).await
}

pub async fn fetch_venue(id: &str) -> Result<Venue, ApiError> {
    http::get_json(&format!("/api/admin/venues/{}", path_segment(id))).await
}

/// Verify `{notes?}`, suspend `{reason}`, activate без тела
pub async fn moderate_venue(id: String, request: ModerationRequest) -> Result<(), ApiError> {
    let base = format!("/api/admin/venues/{}", path_segment(&id));
    match &request {
        ModerationRequest::Verify { .. } => {
            http::patch_json::<_, IgnoredAny>(&format!("{}/verify", base), &request).await?;
        }
        ModerationRequest::Suspend { reason, .. } => {
            let body = serde_json::json!({ "reason": reason });
            http::patch_json::<_, IgnoredAny>(&format!("{}/suspend", base), &body).await?;
        }
        ModerationRequest::Activate { .. } => {
            http::patch_empty::<IgnoredAny>(&format!("{}/activate", base)).await?;
        }
        ModerationRequest::Delete { .. } => {
            return Err(ApiError::Validation {
                status: 400,
                message: "Venues cannot be deleted from the admin panel".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_body_skips_empty_notes() {
        let body = serde_json::to_value(ModerationRequest::Verify { notes: None }).unwrap();
        assert_eq!(body, serde_json::json!({}));
        let body = serde_json::to_value(ModerationRequest::Verify {
            notes: Some("documents checked".into()),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "notes": "documents checked" }));
    }

    #[test]
    fn test_list_key_depends_on_verified_filter() {
        let all = ListQuery::default();
        let mut pending = ListQuery::default();
        pending.set_filter("verified", "false");
        assert_ne!(list_key(&all), list_key(&pending));
        assert!(list_key(&pending).starts_with(&venues_root()));
    }
}
