//! Кэш ответов API по ключу запроса.
//!
//! Для одного ключа побеждает последний *начатый* запрос: ответ с устаревшим
//! тикетом отбрасывается, даже если пришёл позже. Инвалидация по префиксу
//! удаляет записи, так что ответы запросов, начатых до неё, тоже
//! отбрасываются. Эпоха инвалидаций ведётся отдельно для каждого корня
//! (`disputes`, `users`, ...): сброс одного ресурса не трогает остальные.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn root(segment: &str) -> Self {
        Self(vec![segment.to_string()])
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Первый сегмент: ресурс, к которому относится ключ
    pub fn root_segment(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Квитанция на запрос; `complete` принимает только последнюю для ключа
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: QueryKey,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: Option<V>,
    error: Option<String>,
    latest: u64,
    loading: bool,
}

#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, Entry<V>>,
    next_generation: u64,
    epochs: HashMap<String, u64>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
            epochs: HashMap::new(),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Регистрирует новый запрос; предыдущие тикеты ключа устаревают
    pub fn begin(&mut self, key: QueryKey) -> Ticket {
        self.next_generation += 1;
        let generation = self.next_generation;
        let entry = self.entries.entry(key.clone()).or_insert(Entry {
            value: None,
            error: None,
            latest: 0,
            loading: false,
        });
        entry.latest = generation;
        entry.loading = true;
        Ticket { key, generation }
    }

    fn current_entry(&mut self, ticket: &Ticket) -> Option<&mut Entry<V>> {
        self.entries
            .get_mut(&ticket.key)
            .filter(|e| e.latest == ticket.generation)
    }

    /// `false`, если тикет устарел и значение отброшено
    pub fn complete(&mut self, ticket: &Ticket, value: V) -> bool {
        match self.current_entry(ticket) {
            Some(entry) => {
                entry.value = Some(value);
                entry.error = None;
                entry.loading = false;
                true
            }
            None => false,
        }
    }

    /// Ошибка сохраняется только для актуального тикета; прежнее значение остаётся
    pub fn fail(&mut self, ticket: &Ticket, message: impl Into<String>) -> bool {
        match self.current_entry(ticket) {
            Some(entry) => {
                entry.error = Some(message.into());
                entry.loading = false;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.entries.get(key).and_then(|e| e.value.clone())
    }

    pub fn error(&self, key: &QueryKey) -> Option<String> {
        self.entries.get(key).and_then(|e| e.error.clone())
    }

    pub fn is_loading(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.loading).unwrap_or(false)
    }

    /// Удаляет все записи с данным префиксом и увеличивает эпоху его корня
    pub fn invalidate_prefix(&mut self, prefix: &QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| !k.starts_with(prefix));
        if let Some(root) = prefix.root_segment() {
            *self.epochs.entry(root.to_string()).or_insert(0) += 1;
        }
        before - self.entries.len()
    }

    /// Число инвалидаций под корнем `root`
    pub fn epoch_of(&self, root: &str) -> u64 {
        self.epochs.get(root).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(parts: &[&str]) -> QueryKey {
        QueryKey::new(parts.iter().copied())
    }

    #[test]
    fn test_last_started_wins() {
        let mut cache = QueryCache::new();
        let k = key(&["disputes", "pending", "page=1"]);
        let old = cache.begin(k.clone());
        let new = cache.begin(k.clone());

        assert!(cache.complete(&new, "new"));
        assert!(!cache.complete(&old, "old"));
        assert_eq!(cache.get(&k), Some("new"));
        assert!(!cache.is_loading(&k));
    }

    #[test]
    fn test_stale_failure_ignored() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        let k = key(&["users", "q"]);
        let old = cache.begin(k.clone());
        let new = cache.begin(k.clone());
        assert!(!cache.fail(&old, "timeout"));
        assert!(cache.is_loading(&k));
        assert!(cache.error(&k).is_none());
        assert!(cache.fail(&new, "boom"));
        assert_eq!(cache.error(&k).as_deref(), Some("boom"));
    }

    #[test]
    fn test_invalidate_prefix_only_matching() {
        let mut cache = QueryCache::new();
        for k in [
            key(&["disputes", "pending", "page=1"]),
            key(&["disputes", "detail", "42"]),
            key(&["users", "list"]),
        ] {
            let t = cache.begin(k);
            cache.complete(&t, 1);
        }
        assert_eq!(cache.invalidate_prefix(&QueryKey::root("disputes")), 2);
        assert_eq!(cache.epoch_of("disputes"), 1);
        assert_eq!(cache.get(&key(&["users", "list"])), Some(1));
        assert!(cache.get(&key(&["disputes", "detail", "42"])).is_none());
    }

    #[test]
    fn test_epochs_are_per_root() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        let disputes_before = cache.epoch_of("disputes");
        cache.invalidate_prefix(&QueryKey::root("users"));
        cache.invalidate_prefix(&QueryKey::root("users").child("detail").child("u1"));
        assert_eq!(cache.epoch_of("users"), 2);
        assert_eq!(cache.epoch_of("disputes"), disputes_before);
        assert_eq!(cache.epoch_of("teams"), 0);
    }

    #[test]
    fn test_inflight_before_invalidation_dropped() {
        let mut cache = QueryCache::new();
        let k = key(&["disputes", "detail", "7"]);
        let t = cache.begin(k.clone());
        cache.invalidate_prefix(&QueryKey::root("disputes"));
        assert!(!cache.complete(&t, "stale"));
        assert!(cache.get(&k).is_none());
    }

    #[test]
    fn test_key_display_and_prefix() {
        let k = QueryKey::root("disputes").child("detail").child("9");
        assert_eq!(k.to_string(), "disputes/detail/9");
        assert!(k.starts_with(&QueryKey::root("disputes")));
        assert!(!k.starts_with(&QueryKey::root("dispute")));
    }
}
