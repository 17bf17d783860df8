//! Application Shell - корневые компоненты приложения
//!
//! Содержит:
//! - `AppShell` - auth gate (показывает LoginPage или MainLayout)
//! - `MainLayout` - основной layout приложения (Shell + Sidebar + Tabs)

use crate::layout::center::tabs::TabBar;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::shared::notify::NotificationHost;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use contracts::system::auth::LOGIN_ROUTE;
use leptos::logging::log;
use leptos::prelude::*;
use web_sys::window;

/// Main application layout с Sidebar и Tabs.
///
/// Инициализирует router integration для синхронизации табов с URL (?active=...).
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    tabs_store.init_router_integration();

    // Дашборд открыт всегда, если других табов нет
    if tabs_store.opened.with_untracked(|tabs| tabs.is_empty()) {
        tabs_store.open_tab("d400_overview", "Dashboard");
    }

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <TabBar />
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! {
                                <TabPage tab=tab tabs_store=tabs_store />
                            }
                        }
                    />
                }.into_any()
            }
        />
    }
}

fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn replace_path(path: &str) {
    if current_path() == path {
        return;
    }
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&format!("{}{}", path, search)),
        );
    }
}

/// Application shell - auth gate component.
///
/// Показывает:
/// - `LoginPage` если сессии нет
/// - `MainLayout` если администратор вошёл
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    // Адрес страницы следует за сессией: /login без неё, / после входа
    Effect::new(move |_| {
        let signed_in = auth_state.with(|s| s.session.is_some());
        if signed_in {
            if current_path() == LOGIN_ROUTE {
                replace_path("/");
            }
        } else {
            log!("No admin session, showing login");
            replace_path(LOGIN_ROUTE);
        }
    });

    view! {
        <Show
            when=move || auth_state.with(|s| s.session.is_some())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
        <NotificationHost />
    }
}
