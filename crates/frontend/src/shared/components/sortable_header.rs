use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use thaw::*;

/// Заголовок колонки с сортировкой по клику; индикатор ▲/▼ берётся из `query`
#[component]
pub fn SortableHeader(
    label: &'static str,
    sort_key: &'static str,
    #[prop(into)] query: Signal<ListQuery>,
    on_sort: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <TableHeaderCell>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=move |_| on_sort.run(sort_key)
            >
                {label}
                <span class="table__sort-indicator">
                    {move || query.with(|q| q.sort_indicator(sort_key))}
                </span>
            </div>
        </TableHeaderCell>
    }
}
