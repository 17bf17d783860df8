use leptos::prelude::*;

/// Цветная метка статуса. `variant`: success | warning | error | primary | neutral
#[component]
pub fn StatusBadge(variant: &'static str, #[prop(into)] label: String) -> impl IntoView {
    let class = format!("badge badge--{}", variant);
    view! { <span class=class>{label}</span> }
}
