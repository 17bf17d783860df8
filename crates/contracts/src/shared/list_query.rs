//! Состояние фильтров, сортировки и пагинации списочных страниц.
//!
//! Любое изменение фильтра возвращает на первую страницу. Страницы
//! нумеруются с 1.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Asc => " ▲",
            Self::Desc => " ▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            date_from: None,
            date_to: None,
            sort_by: None,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начальная сортировка, например `created_at desc`
    pub fn sorted_by(mut self, key: &str, direction: SortDirection) -> Self {
        self.sort_by = Some(key.to_string());
        self.sort_direction = direction;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn set_search(&mut self, search: &str) {
        if self.search != search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    /// Пустое значение снимает фильтр
    pub fn set_filter(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.clear_filter(key);
            return;
        }
        if self.filters.get(key).map(String::as_str) != Some(value) {
            self.filters.insert(key.to_string(), value.to_string());
            self.page = 1;
        }
    }

    pub fn clear_filter(&mut self, key: &str) {
        if self.filters.remove(key).is_some() {
            self.page = 1;
        }
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        if self.date_from != from || self.date_to != to {
            self.date_from = from;
            self.date_to = to;
            self.page = 1;
        }
    }

    /// Сбрасывает поиск, фильтры и даты; сортировка и размер страницы сохраняются
    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.filters.clear();
        self.date_from = None;
        self.date_to = None;
        self.page = 1;
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || !self.filters.is_empty()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// Тот же ключ: смена направления, новый ключ: по возрастанию
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_by.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_by = Some(key.to_string());
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn sort_indicator(&self, key: &str) -> &'static str {
        if self.sort_by.as_deref() == Some(key) {
            self.sort_direction.indicator()
        } else {
            ""
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.page_size
    }

    /// Параметры для эндпоинтов с постраничной навигацией (`page` + `limit`)
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filter_pairs();
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("limit".to_string(), self.page_size.to_string()));
        pairs
    }

    /// Параметры для эндпоинтов со смещением (`limit` + `offset`)
    pub fn to_offset_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filter_pairs();
        pairs.push(("limit".to_string(), self.page_size.to_string()));
        pairs.push(("offset".to_string(), self.offset().to_string()));
        pairs
    }

    fn filter_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search".to_string(), search.to_string()));
        }
        for (k, v) in &self.filters {
            pairs.push((k.clone(), v.clone()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("date_from".to_string(), from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("date_to".to_string(), to.format("%Y-%m-%d").to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by".to_string(), sort_by.clone()));
            pairs.push((
                "sort_order".to_string(),
                self.sort_direction.as_str().to_string(),
            ));
        }
        pairs
    }

    /// Стабильный ключ для кэша запросов
    pub fn cache_key_fragment(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Сводка для подписи под таблицей
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub page: usize,
    pub page_size: usize,
    pub total: u64,
    pub total_pages: usize,
    pub first_item: u64,
    pub last_item: u64,
}

impl PageSummary {
    pub fn new(page: usize, page_size: usize, total: u64) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size as u64) as usize;

        let (first_item, last_item) = if total == 0 {
            (0, 0)
        } else {
            let first = ((page - 1) * page_size) as u64 + 1;
            let last = ((page * page_size) as u64).min(total);
            (first.min(total), last)
        };

        Self {
            page,
            page_size,
            total,
            total_pages,
            first_item,
            last_item,
        }
    }

    pub fn for_query(query: &ListQuery, total: u64) -> Self {
        Self::new(query.page, query.page_size, total)
    }

    pub fn label(&self) -> String {
        format!(
            "Showing {}–{} of {}",
            self.first_item, self.last_item, self.total
        )
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_filter_change_resets_page() {
        let mut q = ListQuery::new();
        q.set_page(4);
        q.set_search("juan");
        assert_eq!(q.page, 1);

        q.set_page(3);
        q.set_filter("status", "pending");
        assert_eq!(q.page, 1);

        q.set_page(3);
        q.set_filter("status", "pending");
        assert_eq!(q.page, 3, "same value is not a change");

        q.clear_filter("status");
        assert_eq!(q.page, 1);

        q.set_page(2);
        q.set_date_range(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        assert_eq!(q.page, 1);

        q.set_page(5);
        q.set_page_size(50);
        assert_eq!(q.page, 1);

        q.set_page(5);
        q.reset_filters();
        assert_eq!(q.page, 1);
        assert!(!q.has_active_filters());
    }

    #[test]
    fn test_toggle_sort() {
        let mut q = ListQuery::new();
        q.toggle_sort("created_at");
        assert_eq!(q.sort_direction, SortDirection::Asc);
        q.toggle_sort("created_at");
        assert_eq!(q.sort_direction, SortDirection::Desc);
        assert_eq!(q.sort_indicator("created_at"), " ▼");
        q.toggle_sort("priority");
        assert_eq!(q.sort_by.as_deref(), Some("priority"));
        assert_eq!(q.sort_direction, SortDirection::Asc);
        assert_eq!(q.sort_indicator("created_at"), "");
    }

    #[test]
    fn test_query_pairs() {
        let mut q = ListQuery::new().sorted_by("created_at", SortDirection::Desc);
        q.set_search(" tigres ");
        q.set_filter("priority", "high");
        q.set_date_range(NaiveDate::from_ymd_opt(2024, 3, 1), NaiveDate::from_ymd_opt(2024, 3, 31));
        q.set_page(2);

        let pairs = q.to_query_pairs();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("search"), Some("tigres"));
        assert_eq!(get("priority"), Some("high"));
        assert_eq!(get("date_from"), Some("2024-03-01"));
        assert_eq!(get("date_to"), Some("2024-03-31"));
        assert_eq!(get("sort_order"), Some("desc"));
        assert_eq!(get("page"), Some("2"));
        assert_eq!(get("limit"), Some("20"));

        let offset = q.to_offset_pairs();
        assert!(offset.contains(&("offset".to_string(), "20".to_string())));
        assert!(!offset.iter().any(|(k, _)| k == "page"));
    }

    #[test]
    fn test_page_clamped() {
        let mut q = ListQuery::new();
        q.set_page(0);
        assert_eq!(q.page, 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_summary() {
        let s = PageSummary::new(1, 20, 45);
        assert_eq!(s.total_pages, 3);
        assert_eq!(s.label(), "Showing 1–20 of 45");
        assert!(s.has_next());
        assert!(!s.has_prev());

        let s = PageSummary::new(3, 20, 45);
        assert_eq!(s.label(), "Showing 41–45 of 45");
        assert!(!s.has_next());

        let s = PageSummary::new(1, 20, 0);
        assert_eq!(s.total_pages, 0);
        assert_eq!(s.label(), "Showing 0–0 of 0");

        assert_eq!(PageSummary::new(1, 20, 40).total_pages, 2);
    }
}
