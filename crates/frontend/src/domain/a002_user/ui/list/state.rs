use contracts::domain::a002_user::User;
use contracts::shared::list_query::{ListQuery, PageSummary, SortDirection};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct UserListState {
    pub query: ListQuery,
    pub users: Vec<User>,
    pub total: u64,
    pub is_loaded: bool,
}

impl Default for UserListState {
    fn default() -> Self {
        Self {
            query: ListQuery::new().sorted_by("created_at", SortDirection::Desc),
            users: Vec::new(),
            total: 0,
            is_loaded: false,
        }
    }
}

impl UserListState {
    pub fn apply_page(&mut self, users: Vec<User>, total: u64) {
        self.users = users;
        self.total = total;
        self.is_loaded = true;
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::for_query(&self.query, self.total)
    }
}

pub fn create_state() -> RwSignal<UserListState> {
    RwSignal::new(UserListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_user::UserStatus;

    fn user(id: &str, suspended: bool) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "email": format!("{}@example.com", id),
            "nombre": "",
            "is_admin": false,
            "suspended": suspended,
            "email_verified": true,
            "created_at": "2024-05-01T10:00:00Z",
            "deleted_at": null,
            "teams_count": 2,
            "disputes_filed": 0,
            "disputes_against": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_apply_page_marks_loaded() {
        let mut s = UserListState::default();
        assert!(!s.is_loaded);
        s.apply_page(vec![user("u1", false), user("u2", true)], 42);
        assert!(s.is_loaded);
        assert_eq!(s.users.len(), 2);
        assert_eq!(s.users[1].status(), UserStatus::Suspended);
        assert_eq!(s.summary().label(), "Showing 1–20 of 42");
    }

    #[test]
    fn test_offset_paging_params() {
        let mut s = UserListState::default();
        s.query.set_filter("status", "suspended");
        s.query.set_page(3);
        let pairs = s.query.to_offset_pairs();
        assert!(pairs.contains(&("status".to_string(), "suspended".to_string())));
        assert!(pairs.contains(&("offset".to_string(), "40".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "20".to_string())));
    }
}
