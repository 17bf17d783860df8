use contracts::domain::a004_venue::Venue;
use contracts::shared::list_query::{ListQuery, PageSummary, SortDirection};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct VenueListState {
    pub query: ListQuery,
    pub venues: Vec<Venue>,
    pub total: u64,
    pub is_loaded: bool,
}

impl Default for VenueListState {
    fn default() -> Self {
        Self {
            query: ListQuery::new()
                .sorted_by("created_at", SortDirection::Desc)
                .with_page_size(50),
            venues: Vec::new(),
            total: 0,
            is_loaded: false,
        }
    }
}

impl VenueListState {
    /// Начальный фильтр `verified` (вкладка "Venues to verify" открывается с `false`)
    pub fn with_verified(verified: Option<&str>) -> Self {
        let mut state = Self::default();
        if let Some(v) = verified {
            state.query.set_filter("verified", v);
        }
        state
    }

    pub fn apply_page(&mut self, venues: Vec<Venue>, total: u64) {
        self.venues = venues;
        self.total = total;
        self.is_loaded = true;
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::for_query(&self.query, self.total)
    }
}

pub fn create_state(initial_verified: Option<&str>) -> RwSignal<VenueListState> {
    RwSignal::new(VenueListState::with_verified(initial_verified))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_verified_filter() {
        let s = VenueListState::with_verified(Some("false"));
        assert_eq!(s.query.filter("verified"), Some("false"));
        assert!(s.query.has_active_filters());

        let s = VenueListState::with_verified(None);
        assert_eq!(s.query.filter("verified"), None);
    }
}
