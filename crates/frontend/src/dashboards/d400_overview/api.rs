use contracts::dashboards::d400_overview::{ActivityItem, DashboardStats};
use contracts::shared::api_error::ApiError;
use contracts::shared::query_cache::QueryKey;

use crate::shared::http;

pub fn dashboard_root() -> QueryKey {
    QueryKey::root("dashboard")
}

pub fn stats_key() -> QueryKey {
    dashboard_root().child("stats")
}

pub fn activity_key(limit: usize) -> QueryKey {
    dashboard_root().child("activity").child(limit.to_string())
}

pub async fn fetch_stats() -> Result<DashboardStats, ApiError> {
    http::get_json("/api/admin/dashboard/stats").await
}

/// Лента последних событий; ответ: голый массив
pub async fn fetch_activity(limit: usize) -> Result<Vec<ActivityItem>, ApiError> {
    http::get_json(&format!("/api/admin/dashboard/activity?limit={}", limit)).await
}
