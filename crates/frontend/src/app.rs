use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::notify::Notifier;
use crate::shared::query_cache::QueryClient;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // Общий кэш запросов: списки и карточки инвалидируются после мутаций
    provide_context(QueryClient::new());

    provide_context(Notifier::new());

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
    }
}
