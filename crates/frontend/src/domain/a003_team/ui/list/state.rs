use contracts::domain::a003_team::Team;
use contracts::shared::list_query::{ListQuery, PageSummary, SortDirection};
use leptos::prelude::*;

/// Страница списка команд по умолчанию показывает 50 строк
pub const TEAMS_PAGE_SIZE: usize = 50;

#[derive(Clone, Debug)]
pub struct TeamListState {
    pub query: ListQuery,
    pub teams: Vec<Team>,
    pub total: u64,
    pub is_loaded: bool,
}

impl Default for TeamListState {
    fn default() -> Self {
        Self {
            query: ListQuery::new()
                .sorted_by("created_at", SortDirection::Desc)
                .with_page_size(TEAMS_PAGE_SIZE),
            teams: Vec::new(),
            total: 0,
            is_loaded: false,
        }
    }
}

impl TeamListState {
    pub fn apply_page(&mut self, teams: Vec<Team>, total: u64) {
        self.teams = teams;
        self.total = total;
        self.is_loaded = true;
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::for_query(&self.query, self.total)
    }
}

pub fn create_state() -> RwSignal<TeamListState> {
    RwSignal::new(TeamListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_size() {
        let s = TeamListState::default();
        assert_eq!(s.query.page_size, TEAMS_PAGE_SIZE);
        assert_eq!(s.summary().label(), "Showing 0–0 of 0");
    }

    #[test]
    fn test_zone_filter_resets_page() {
        let mut s = TeamListState::default();
        s.query.set_page(4);
        s.query.set_filter("zona", "Norte");
        assert_eq!(s.query.page, 1);
        let pairs = s.query.to_offset_pairs();
        assert!(pairs.contains(&("zona".to_string(), "Norte".to_string())));
        assert!(pairs.contains(&("offset".to_string(), "0".to_string())));
    }
}
