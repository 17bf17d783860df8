use leptos::prelude::*;

use super::context::use_auth;

/// Контент только для сессии с `is_admin`
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_admin())
            fallback=|| view! { <div class="alert alert--error">"Access denied. Admin privileges required."</div> }
        >
            {children()}
        </Show>
    }
}
