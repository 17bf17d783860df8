use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use super::tabs::tab_label_for_key;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// `?active=<key>` открывает таб при загрузке и обновляется при переключении
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active").cloned() {
            let title = tab_label_for_key(&active_key);
            self.open_tab(&active_key, &title);
        }

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let query_string =
                    serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                        .unwrap_or_default();

                let new_url = format!("?{}", query_string);

                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                // Only update URL if it actually changed
                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
            };
            self.opened.update(|tabs| tabs.push(tab));
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        leptos::logging::log!("close_tab: key='{}'", key);
        let active = self.active.get_untracked();
        let next = self
            .opened
            .with_untracked(|tabs| next_active_after_close(tabs, key, active.as_deref()));
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if active.as_deref() == Some(key) {
            self.active.set(next);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// После закрытия активного таба активируется сосед справа, иначе слева
fn next_active_after_close(tabs: &[Tab], closed: &str, active: Option<&str>) -> Option<String> {
    if active != Some(closed) {
        return active.map(str::to_string);
    }
    let pos = tabs.iter().position(|t| t.key == closed)?;
    tabs.get(pos + 1)
        .or_else(|| pos.checked_sub(1).and_then(|p| tabs.get(p)))
        .map(|t| t.key.clone())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_close_active_prefers_right_neighbour() {
        let t = tabs(&["d400_overview", "a001_dispute", "a002_user"]);
        assert_eq!(
            next_active_after_close(&t, "a001_dispute", Some("a001_dispute")),
            Some("a002_user".to_string())
        );
        assert_eq!(
            next_active_after_close(&t, "a002_user", Some("a002_user")),
            Some("a001_dispute".to_string())
        );
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let t = tabs(&["d400_overview", "a001_dispute"]);
        assert_eq!(
            next_active_after_close(&t, "a001_dispute", Some("d400_overview")),
            Some("d400_overview".to_string())
        );
    }

    #[test]
    fn test_close_last_tab() {
        let t = tabs(&["d400_overview"]);
        assert_eq!(
            next_active_after_close(&t, "d400_overview", Some("d400_overview")),
            None
        );
    }
}
