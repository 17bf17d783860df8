use crate::domain::a001_dispute::api::DisputeQueue;
use contracts::domain::a001_dispute::Dispute;
use contracts::shared::list_query::{ListQuery, PageSummary, SortDirection};
use leptos::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct DisputeListState {
    pub queue: DisputeQueue,
    pub query: ListQuery,
    pub disputes: Vec<Dispute>,
    pub total: u64,
    /// Последний известный total по каждой вкладке (для счётчиков)
    pub queue_totals: HashMap<DisputeQueue, u64>,
    pub is_loaded: bool,
}

impl Default for DisputeListState {
    fn default() -> Self {
        Self {
            queue: DisputeQueue::Pending,
            query: ListQuery::new().sorted_by("created_at", SortDirection::Desc),
            disputes: Vec::new(),
            total: 0,
            queue_totals: HashMap::new(),
            is_loaded: false,
        }
    }
}

impl DisputeListState {
    /// Смена вкладки: фильтры сохраняются, страница сбрасывается
    pub fn switch_queue(&mut self, queue: DisputeQueue) {
        if self.queue == queue {
            return;
        }
        self.queue = queue;
        self.query.set_page(1);
        self.disputes.clear();
        self.total = 0;
        self.is_loaded = false;
    }

    pub fn apply_page(&mut self, queue: DisputeQueue, disputes: Vec<Dispute>, total: u64) {
        self.disputes = disputes;
        self.total = total;
        self.queue_totals.insert(queue, total);
        self.is_loaded = true;
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::for_query(&self.query, self.total)
    }

    pub fn queue_count(&self, queue: DisputeQueue) -> Option<u64> {
        self.queue_totals.get(&queue).copied()
    }
}

pub fn create_state() -> RwSignal<DisputeListState> {
    RwSignal::new(DisputeListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_newest_first() {
        let s = DisputeListState::default();
        assert_eq!(s.query.sort_by.as_deref(), Some("created_at"));
        assert_eq!(s.query.sort_direction, SortDirection::Desc);
        assert_eq!(s.query.page, 1);
    }

    #[test]
    fn test_switch_queue_resets_page_keeps_filters() {
        let mut s = DisputeListState::default();
        s.query.set_filter("priority", "high");
        s.query.set_page(3);
        s.apply_page(DisputeQueue::Pending, Vec::new(), 55);

        s.switch_queue(DisputeQueue::Resolved);
        assert_eq!(s.query.page, 1);
        assert_eq!(s.query.filter("priority"), Some("high"));
        assert_eq!(s.total, 0);
        assert!(!s.is_loaded);
        assert_eq!(s.queue_count(DisputeQueue::Pending), Some(55));
        assert_eq!(s.queue_count(DisputeQueue::Resolved), None);
    }

    #[test]
    fn test_summary_follows_query() {
        let mut s = DisputeListState::default();
        s.apply_page(DisputeQueue::Pending, Vec::new(), 45);
        s.query.set_page(3);
        let summary = s.summary();
        assert_eq!(summary.total_pages, 3);
        assert_eq!(summary.label(), "Showing 41–45 of 45");
    }
}
