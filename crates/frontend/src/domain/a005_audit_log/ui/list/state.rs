use contracts::domain::a005_audit_log::AuditLog;
use contracts::shared::list_query::{ListQuery, PageSummary};
use leptos::prelude::*;

pub const AUDIT_PAGE_SIZE: usize = 50;

#[derive(Clone, Debug)]
pub struct AuditLogListState {
    pub query: ListQuery,
    pub logs: Vec<AuditLog>,
    pub total: u64,
    pub is_loaded: bool,
}

impl Default for AuditLogListState {
    fn default() -> Self {
        Self {
            // Сервер отдаёт записи от новых к старым, сортировка не передаётся
            query: ListQuery::new().with_page_size(AUDIT_PAGE_SIZE),
            logs: Vec::new(),
            total: 0,
            is_loaded: false,
        }
    }
}

impl AuditLogListState {
    pub fn apply_page(&mut self, logs: Vec<AuditLog>, total: u64) {
        self.logs = logs;
        self.total = total;
        self.is_loaded = true;
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::for_query(&self.query, self.total)
    }

    /// Текстовые фильтры (action, admin_id) применяются кнопкой, пустое значение снимает фильтр
    pub fn apply_text_filters(&mut self, action: &str, admin_id: &str) {
        self.query.set_filter("action", action.trim());
        self.query.set_filter("admin_id", admin_id.trim());
    }
}

pub fn create_state() -> RwSignal<AuditLogListState> {
    RwSignal::new(AuditLogListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_filters_and_offset() {
        let mut s = AuditLogListState::default();
        s.query.set_page(2);
        s.apply_text_filters("  suspend_user ", "");
        assert_eq!(s.query.page, 1);
        assert_eq!(s.query.filter("action"), Some("suspend_user"));
        assert_eq!(s.query.filter("admin_id"), None);

        s.query.set_page(3);
        let pairs = s.query.to_offset_pairs();
        assert!(pairs.contains(&("offset".to_string(), "100".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "50".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "sort_by"));
    }
}
