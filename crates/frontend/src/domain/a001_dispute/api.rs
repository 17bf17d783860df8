//! Запросы к API споров и ключи кэша.
//!
//! Все ключи начинаются с `disputes`: успешное действие над спором
//! сбрасывает списки, карточки и статистику одним вызовом.

use contracts::domain::a001_dispute::{
    ActionRequest, CommentsResponse, DisputeActionResponse, DisputeComment, DisputeDetailResponse,
    DisputeEvidence, DisputeStats, DisputesListResponse, EvidenceResponse,
};
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::query_cache::QueryKey;

use crate::shared::api_utils::path_segment;
use crate::shared::http;

/// Вкладка списка споров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisputeQueue {
    Pending,
    Resolved,
}

impl DisputeQueue {
    pub const ALL: [DisputeQueue; 2] = [Self::Pending, Self::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Self::Pending => "/api/admin/disputes/pending",
            Self::Resolved => "/api/admin/disputes/resolved",
        }
    }
}

// ============================================================================
// Cache keys
// ============================================================================

pub fn disputes_root() -> QueryKey {
    QueryKey::root("disputes")
}

pub fn list_key(queue: DisputeQueue, query: &ListQuery) -> QueryKey {
    disputes_root()
        .child(queue.as_str())
        .child(query.cache_key_fragment())
}

pub fn detail_key(id: &str) -> QueryKey {
    disputes_root().child("detail").child(id)
}

pub fn stats_key() -> QueryKey {
    disputes_root().child("stats")
}

// ============================================================================
// Queries
// ============================================================================

pub async fn fetch_disputes(
    queue: DisputeQueue,
    query: &ListQuery,
) -> Result<DisputesListResponse, ApiError> {
    http::get_json_with_query(queue.path(), &query.to_query_pairs()).await
}

pub async fn fetch_dispute(id: &str) -> Result<DisputeDetailResponse, ApiError> {
    http::get_json(&format!("/api/disputes/{}", path_segment(id))).await
}

pub async fn fetch_evidence(id: &str) -> Result<Vec<DisputeEvidence>, ApiError> {
    let resp: EvidenceResponse =
        http::get_json(&format!("/api/disputes/{}/evidence", path_segment(id))).await?;
    Ok(resp.evidence)
}

pub async fn fetch_comments(id: &str) -> Result<Vec<DisputeComment>, ApiError> {
    let resp: CommentsResponse =
        http::get_json(&format!("/api/disputes/{}/comments", path_segment(id))).await?;
    Ok(resp.comments)
}

pub async fn fetch_stats() -> Result<DisputeStats, ApiError> {
    http::get_json("/api/admin/disputes/stats").await
}

// ============================================================================
// Mutations
// ============================================================================

/// `POST /api/admin/disputes/:id/{review|resolve|request-info}`
pub async fn submit_action(
    id: &str,
    request: &ActionRequest,
) -> Result<DisputeActionResponse, ApiError> {
    http::post_json(&request.endpoint_path(&path_segment(id)), request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_share_disputes_prefix() {
        let query = ListQuery::default();
        let root = disputes_root();
        assert!(list_key(DisputeQueue::Pending, &query).starts_with(&root));
        assert!(detail_key("d1").starts_with(&root));
        assert!(stats_key().starts_with(&root));
    }

    #[test]
    fn test_list_key_depends_on_query() {
        let a = ListQuery::default();
        let mut b = ListQuery::default();
        b.set_filter("priority", "high");
        assert_ne!(
            list_key(DisputeQueue::Pending, &a),
            list_key(DisputeQueue::Pending, &b)
        );
        assert_ne!(
            list_key(DisputeQueue::Pending, &a),
            list_key(DisputeQueue::Resolved, &a)
        );
    }
}
