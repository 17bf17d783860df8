use crate::shared::icons::icon;
use contracts::shared::list_query::{PageSummary, PAGE_SIZE_OPTIONS};
use leptos::prelude::*;

/// PaginationControls component - страницы нумеруются с 1
#[component]
pub fn PaginationControls(
    /// Текущая страница, размер и total
    #[prop(into)]
    summary: Signal<PageSummary>,

    /// Callback when page changes
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,
) -> impl IntoView {
    let last_page = move || summary.get().total_pages.max(1);

    view! {
        <div class="pagination-controls">
            <span class="pagination-summary">{move || summary.get().label()}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || !summary.get().has_prev()
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let s = summary.get();
                    if s.has_prev() {
                        on_page_change.run(s.page - 1);
                    }
                }
                disabled=move || !summary.get().has_prev()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("Page {} of {}", summary.get().page, last_page())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let s = summary.get();
                    if s.has_next() {
                        on_page_change.run(s.page + 1);
                    }
                }
                disabled=move || !summary.get().has_next()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(last_page())
                disabled=move || !summary.get().has_next()
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || summary.get().page_size.to_string()
            >
                {PAGE_SIZE_OPTIONS.iter().map(|&size| {
                    view! {
                        <option value=size.to_string() selected=move || summary.get().page_size == size>
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
