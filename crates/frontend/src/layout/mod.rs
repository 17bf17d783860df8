pub mod center;
pub mod global_context;
pub mod left;
pub mod tabs;
pub mod top_header;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use top_header::TopHeader;

/// Каркас: шапка сверху, слева меню, справа полоса табов и их содержимое.
/// Меню скрывается кнопкой в шапке (`AppGlobalContext::left_open`).
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <aside data-zone="left" class="app-sidebar" class:hidden=move || !ctx.left_open.get()>
                    {left()}
                </aside>
                <main data-zone="center" class="app-main app-tabs">
                    {center()}
                </main>
            </div>
        </div>
    }
}
