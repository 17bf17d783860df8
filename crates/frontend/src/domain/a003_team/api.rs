//! Команды: список и модерация (`/api/admin/teams`) и редактор состава
//! (`/api/admin/reports/teams`). Все ключи кэша под `teams`.

use contracts::domain::a003_team::{
    AddMemberRequest, MembersResponse, TeamDetail, TeamMember, TeamReportRow, TeamRoster,
    TeamsResponse, UpdateTeamRequest,
};
use contracts::domain::common::ModerationRequest;
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use contracts::shared::query_cache::QueryKey;
use serde::de::IgnoredAny;

use crate::shared::api_utils::path_segment;
use crate::shared::http;

pub fn teams_root() -> QueryKey {
    QueryKey::root("teams")
}

pub fn list_key(query: &ListQuery) -> QueryKey {
    teams_root().child("list").child(query.cache_key_fragment())
}

pub fn detail_key(id: &str) -> QueryKey {
    teams_root().child("detail").child(id)
}

pub fn roster_list_key() -> QueryKey {
    teams_root().child("roster")
}

pub fn roster_key(id: &str) -> QueryKey {
    roster_list_key().child(id)
}

// ============================================================================
// Admin list + moderation
// ============================================================================

/// `GET /api/admin/teams` (search, zona, suspended, limit, offset)
pub async fn fetch_teams(query: &ListQuery) -> Result<TeamsResponse, ApiError> {
    http::get_json_with_query("/api/admin/teams", &query.to_offset_pairs()).await
}

pub async fn fetch_team(id: &str) -> Result<TeamDetail, ApiError> {
    http::get_json(&format!("/api/admin/teams/{}", path_segment(id))).await
}

/// Suspend с причиной; activate без тела
pub async fn moderate_team(id: String, request: ModerationRequest) -> Result<(), ApiError> {
    let base = format!("/api/admin/teams/{}", path_segment(&id));
    match request {
        ModerationRequest::Suspend { reason, .. } => {
            let body = serde_json::json!({ "reason": reason });
            http::patch_json::<_, IgnoredAny>(&format!("{}/suspend", base), &body).await?;
        }
        ModerationRequest::Activate { .. } => {
            http::patch_empty::<IgnoredAny>(&format!("{}/activate", base)).await?;
        }
        other => {
            return Err(ApiError::Validation {
                status: 400,
                message: format!("{} is not supported for teams", other.action().title()),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Roster editor
// ============================================================================

/// Отчёт возвращает голый массив
pub async fn fetch_roster_list() -> Result<Vec<TeamReportRow>, ApiError> {
    http::get_json("/api/admin/reports/teams/list").await
}

pub async fn fetch_roster(id: &str) -> Result<TeamRoster, ApiError> {
    http::get_json(&format!("/api/admin/reports/teams/{}", path_segment(id))).await
}

pub async fn update_team(id: &str, request: &UpdateTeamRequest) -> Result<(), ApiError> {
    let path = format!("/api/admin/reports/teams/{}", path_segment(id));
    http::patch_json::<_, IgnoredAny>(&path, request).await?;
    Ok(())
}

/// 400 (например, лимит капитанов) возвращается как `ApiError::Validation`
/// с текстом сервера
pub async fn add_member(id: &str, request: &AddMemberRequest) -> Result<Vec<TeamMember>, ApiError> {
    let path = format!("/api/admin/reports/teams/{}/members", path_segment(id));
    let resp: MembersResponse = http::post_json(&path, request).await?;
    Ok(resp.members)
}

pub async fn remove_member(team_id: &str, user_id: &str) -> Result<(), ApiError> {
    let path = format!(
        "/api/admin/reports/teams/{}/members/{}",
        path_segment(team_id),
        path_segment(user_id)
    );
    http::delete_json::<(), IgnoredAny>(&path, None).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_keys_under_teams() {
        let root = teams_root();
        assert!(roster_key("t1").starts_with(&root));
        assert!(roster_key("t1").starts_with(&roster_list_key()));
        assert!(list_key(&ListQuery::default()).starts_with(&root));
        assert!(!detail_key("t1").starts_with(&roster_list_key()));
    }
}
