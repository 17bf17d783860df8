use contracts::domain::a005_audit_log::{AuditEntityType, AuditLog, AuditLogsResponse};
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::query_cache::QueryKey;

use crate::shared::api_utils::path_segment;
use crate::shared::http;

pub fn audit_root() -> QueryKey {
    QueryKey::root("audit-logs")
}

pub fn list_key(query: &ListQuery) -> QueryKey {
    audit_root().child("list").child(query.cache_key_fragment())
}

pub fn entity_history_key(entity_type: AuditEntityType, entity_id: &str) -> QueryKey {
    audit_root()
        .child("entity")
        .child(entity_type.as_str())
        .child(entity_id)
}

/// `GET /api/admin/audit-logs` (action, entity_type, admin_id, limit, offset)
pub async fn fetch_logs(query: &ListQuery) -> Result<AuditLogsResponse, ApiError> {
    http::get_json_with_query("/api/admin/audit-logs", &query.to_offset_pairs()).await
}

/// История одной сущности; ответ: голый массив
pub async fn fetch_entity_history(
    entity_type: AuditEntityType,
    entity_id: &str,
) -> Result<Vec<AuditLog>, ApiError> {
    http::get_json(&format!(
        "/api/admin/audit-logs/{}/{}",
        entity_type.as_str(),
        path_segment(entity_id)
    ))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_key_is_per_entity() {
        let a = entity_history_key(AuditEntityType::User, "u1");
        let b = entity_history_key(AuditEntityType::Team, "u1");
        assert_ne!(a, b);
        assert!(a.starts_with(&audit_root()));
    }
}
