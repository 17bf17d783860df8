pub mod state;

use self::state::create_state;
use crate::domain::a001_dispute::api::{self, DisputeQueue};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{dispute_detail_key, tab_label_for_key};
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_select::FilterSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::sortable_header::SortableHeader;
use crate::shared::date_utils::{format_timestamp, input_date_value, parse_input_date};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::query_cache::use_query_client;
use contracts::domain::a001_dispute::{
    Dispute, DisputePriority, DisputeStatus, DisputeType, DisputesListResponse,
};
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn DisputeList() -> impl IntoView {
    let state = create_state();
    let client = use_query_client();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (is_filter_expanded, set_is_filter_expanded) = signal(true);
    let search_input = RwSignal::new(String::new());

    // Только параметры запроса: обновление данных не должно перезапускать загрузку
    let request = Memo::new(move |_| state.with(|s| (s.queue, s.query.clone())));
    let query = Signal::derive(move || request.with(|(_, q)| q.clone()));

    let load = move |queue: DisputeQueue, query: ListQuery| {
        let key = api::list_key(queue, &query);
        if let Some(cached) = client.peek::<DisputesListResponse>(&key) {
            state.update(|s| s.apply_page(queue, cached.disputes, cached.total));
        }
        set_loading.set(true);
        spawn_local(async move {
            let requested = query.clone();
            let Some(result) = client.fetch(key, api::fetch_disputes(queue, &query)).await else {
                return;
            };
            // Пока шёл запрос, пользователь мог сменить фильтр или вкладку
            if !state.with_untracked(|s| s.queue == queue && s.query == requested) {
                return;
            }
            match result {
                Ok(resp) => {
                    state.update(|s| s.apply_page(queue, resp.disputes, resp.total));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load {} disputes: {}", queue.as_str(), e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        let (queue, query) = request.get();
        client.epoch_for(&api::disputes_root());
        load(queue, query);
    });

    let reload = move || {
        let (queue, query) = request.get_untracked();
        load(queue, query);
    };

    let update_query = move |f: &dyn Fn(&mut ListQuery)| state.update(|s| f(&mut s.query));

    let on_sort = Callback::new(move |key: &'static str| update_query(&|q| q.toggle_sort(key)));
    let on_page_change = Callback::new(move |page: usize| update_query(&|q| q.set_page(page)));
    let on_page_size_change =
        Callback::new(move |size: usize| update_query(&|q| q.set_page_size(size)));

    let filter_value = move |key: &'static str| {
        Signal::derive(move || {
            state.with(|s| s.query.filter(key).unwrap_or_default().to_string())
        })
    };
    let set_filter = move |key: &'static str| {
        Callback::new(move |value: String| update_query(&|q| q.set_filter(key, &value)))
    };

    let apply_search = move || {
        let text = search_input.get_untracked();
        update_query(&|q| q.set_search(text.trim()));
    };

    let reset_filters = move || {
        search_input.set(String::new());
        update_query(&|q| q.reset_filters());
    };

    let active_filters_count = Signal::derive(move || {
        state.with(|s| {
            let q = &s.query;
            q.filters.len()
                + usize::from(!q.search.is_empty())
                + usize::from(q.date_from.is_some())
                + usize::from(q.date_to.is_some())
        })
    });

    let open_detail = move |dispute: &Dispute| {
        let key = dispute_detail_key(&dispute.id);
        tabs_store.open_tab(&key, &tab_label_for_key(&key));
    };

    let status_options: Vec<(&'static str, &'static str)> = DisputeStatus::ALL
        .iter()
        .map(|s| (s.as_str(), s.label()))
        .collect();
    let type_options: Vec<(&'static str, &'static str)> = DisputeType::ALL
        .iter()
        .map(|t| (t.as_str(), t.label()))
        .collect();
    let priority_options: Vec<(&'static str, &'static str)> = DisputePriority::ALL
        .iter()
        .map(|p| (p.as_str(), p.label()))
        .collect();
    let status_options = StoredValue::new(status_options);
    let type_options = StoredValue::new(type_options);
    let priority_options = StoredValue::new(priority_options);

    view! {
        <PageFrame page_id="a001_dispute--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("alert-triangle")}
                    <h1 class="page__title">"Disputes Management"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="page-tabs">
                    {DisputeQueue::ALL.into_iter().map(|queue| {
                        view! {
                            <button
                                class="page-tabs__item"
                                class:page-tabs__item--active=move || state.with(|s| s.queue == queue)
                                on:click=move |_| state.update(|s| s.switch_queue(queue))
                            >
                                {queue.label()}
                                {move || state.with(|s| s.queue_count(queue)).map(|n| view! {
                                    <span class="page-tabs__count">{n}</span>
                                })}
                            </button>
                        }
                    }).collect_view()}
                </div>

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div
                            class="filter-panel-header__left"
                            on:click=move |_| set_is_filter_expanded.update(|e| *e = !*e)
                        >
                            {icon("filter")}
                            <span class="filter-panel__title">"Filters"</span>
                            {move || {
                                let count = active_filters_count.get();
                                (count > 0).then(|| view! { <span class="filter-panel__badge">{count}</span> })
                            }}
                        </div>

                        <div class="filter-panel-header__center">
                            <PaginationControls
                                summary=Signal::derive(move || state.with(|s| s.summary()))
                                on_page_change=on_page_change
                                on_page_size_change=on_page_size_change
                            />
                        </div>
                    </div>

                    <Show when=move || is_filter_expanded.get()>
                        <div class="filter-panel-content">
                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <div style="flex: 1; max-width: 320px;">
                                    <Flex vertical=true gap=FlexGap::Small>
                                        <Label>"Search"</Label>
                                        <Input
                                            value=search_input
                                            placeholder="Description, reporter, team..."
                                        />
                                    </Flex>
                                </div>
                                <Button appearance=ButtonAppearance::Secondary on_click=move |_| apply_search()>
                                    "Search"
                                </Button>

                                <FilterSelect
                                    label="Status"
                                    value=filter_value("status")
                                    options=status_options.get_value()
                                    on_change=set_filter("status")
                                />
                                <FilterSelect
                                    label="Type"
                                    value=filter_value("type")
                                    options=type_options.get_value()
                                    on_change=set_filter("type")
                                />
                                <FilterSelect
                                    label="Priority"
                                    value=filter_value("priority")
                                    options=priority_options.get_value()
                                    on_change=set_filter("priority")
                                />

                                <div class="filter-field">
                                    <label class="filter-field__label">"From"</label>
                                    <input
                                        type="date"
                                        class="form__input"
                                        prop:value=move || state.with(|s| input_date_value(s.query.date_from))
                                        on:change=move |ev| {
                                            let from = parse_input_date(&event_target_value(&ev));
                                            update_query(&|q| q.set_date_range(from, q.date_to));
                                        }
                                    />
                                </div>
                                <div class="filter-field">
                                    <label class="filter-field__label">"To"</label>
                                    <input
                                        type="date"
                                        class="form__input"
                                        prop:value=move || state.with(|s| input_date_value(s.query.date_to))
                                        on:change=move |ev| {
                                            let to = parse_input_date(&event_target_value(&ev));
                                            update_query(&|q| q.set_date_range(q.date_from, to));
                                        }
                                    />
                                </div>

                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| reset_filters()
                                    disabled=Signal::derive(move || active_filters_count.get() == 0)
                                >
                                    {icon("x")}
                                    " Reset"
                                </Button>
                            </Flex>
                        </div>
                    </Show>
                </div>

                <ErrorBanner error=error on_retry=Callback::new(move |_| reload()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"ID"</TableHeaderCell>
                                <TableHeaderCell>"Type"</TableHeaderCell>
                                <SortableHeader label="Status" sort_key="status" query=query on_sort=on_sort />
                                <SortableHeader label="Priority" sort_key="priority" query=query on_sort=on_sort />
                                <TableHeaderCell>"Reporter"</TableHeaderCell>
                                <TableHeaderCell>"Reported"</TableHeaderCell>
                                <TableHeaderCell>"Match"</TableHeaderCell>
                                <SortableHeader label="Created" sort_key="created_at" query=query on_sort=on_sort />
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let rows = state.with(|s| s.disputes.clone());
                                if rows.is_empty() {
                                    let text = if loading.get() { "Loading disputes..." } else { "No disputes found" };
                                    return view! {
                                        <tr><td colspan="9" class="table__empty">{text}</td></tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|d| {
                                    let row = d.clone();
                                    let row_for_button = d.clone();
                                    let priority = d.priority.map(|p| view! {
                                        <StatusBadge variant=p.badge_variant() label=p.label() />
                                    });
                                    let match_label = d.match_ref.as_ref()
                                        .map(|m| format!("{} · {}", m.date, m.venue_name))
                                        .unwrap_or_else(|| "-".to_string());
                                    let reported_kind = d.reported.kind_label();
                                    let short_id = format!("#{}", d.short_id());
                                    let type_label = d.dispute_type.label();
                                    let status_variant = d.status.badge_variant();
                                    let status_label = d.status.label();
                                    let reporter_name = d.reporter_name();
                                    let reported_name = d.reported.display_name();
                                    let created_at = format_timestamp(&d.created_at);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link mono"
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            open_detail(&row);
                                                        }
                                                    >
                                                        {short_id}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{type_label}</TableCell>
                                            <TableCell>
                                                <StatusBadge variant=status_variant label=status_label />
                                            </TableCell>
                                            <TableCell>{priority}</TableCell>
                                            <TableCell>{reporter_name}</TableCell>
                                            <TableCell>
                                                {reported_name}
                                                {(!reported_kind.is_empty()).then(|| view! {
                                                    <span class="text-muted">{format!(" ({})", reported_kind)}</span>
                                                })}
                                            </TableCell>
                                            <TableCell>{match_label}</TableCell>
                                            <TableCell>{created_at}</TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| open_detail(&row_for_button)
                                                >
                                                    {icon("eye")}
                                                    " View"
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view().into_any()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}
