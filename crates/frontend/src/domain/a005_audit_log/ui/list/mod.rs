pub mod state;

use self::state::create_state;
use super::details::AuditLogDetailModal;
use crate::domain::a005_audit_log::api;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_select::FilterSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::query_cache::use_query_client;
use contracts::domain::a005_audit_log::{AuditEntityType, AuditLog, AuditLogsResponse};
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn AuditLogList() -> impl IntoView {
    let state = create_state();
    let client = use_query_client();

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let action_input = RwSignal::new(String::new());
    let admin_input = RwSignal::new(String::new());
    let selected_log = RwSignal::new(None::<AuditLog>);

    let query = Memo::new(move |_| state.with(|s| s.query.clone()));

    let load = move |query: ListQuery| {
        let key = api::list_key(&query);
        if let Some(cached) = client.peek::<AuditLogsResponse>(&key) {
            state.update(|s| s.apply_page(cached.logs, cached.total));
        }
        set_loading.set(true);
        spawn_local(async move {
            let requested = query.clone();
            let Some(result) = client.fetch(key, api::fetch_logs(&query)).await else {
                return;
            };
            if !state.with_untracked(|s| s.query == requested) {
                return;
            }
            match result {
                Ok(resp) => {
                    state.update(|s| s.apply_page(resp.logs, resp.total));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load audit logs: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        let q = query.get();
        client.epoch_for(&api::audit_root());
        load(q);
    });

    let reload = move || load(query.get_untracked());

    let on_page_change =
        Callback::new(move |page: usize| state.update(|s| s.query.set_page(page)));
    let on_page_size_change =
        Callback::new(move |size: usize| state.update(|s| s.query.set_page_size(size)));

    let entity_type = Signal::derive(move || {
        state.with(|s| s.query.filter("entity_type").unwrap_or_default().to_string())
    });
    let set_entity_type = Callback::new(move |value: String| {
        state.update(|s| s.query.set_filter("entity_type", &value))
    });
    let apply_text_filters = move || {
        let (action, admin) = (action_input.get_untracked(), admin_input.get_untracked());
        state.update(|s| s.apply_text_filters(&action, &admin));
    };
    let clear_filters = move || {
        action_input.set(String::new());
        admin_input.set(String::new());
        state.update(|s| s.query.reset_filters());
    };
    let has_filters = Signal::derive(move || state.with(|s| s.query.has_active_filters()));

    let entity_options: Vec<(&'static str, &'static str)> = AuditEntityType::ALL
        .iter()
        .map(|t| (t.as_str(), t.label()))
        .collect();

    view! {
        <PageFrame page_id="a005_audit_log--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("clipboard")}
                    <h1 class="page__title">"Audit Logs"</h1>
                    {move || state.with(|s| s.is_loaded.then(|| view! {
                        <span class="page__subtitle">{format!("{} entries", s.total)}</span>
                    }))}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            {icon("filter")}
                            <span class="filter-panel__title">"Filters"</span>
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                summary=Signal::derive(move || state.with(|s| s.summary()))
                                on_page_change=on_page_change
                                on_page_size_change=on_page_size_change
                            />
                        </div>
                    </div>
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <FilterSelect
                                label="Entity type"
                                value=entity_type
                                options=entity_options
                                on_change=set_entity_type
                            />
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Action"</Label>
                                <Input value=action_input placeholder="Filter by action..." />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Admin ID"</Label>
                                <Input value=admin_input placeholder="Admin user ID" />
                            </Flex>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| apply_text_filters()>
                                "Apply"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| clear_filters()
                                disabled=Signal::derive(move || !has_filters.get())
                            >
                                {icon("x")}
                                " Clear"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <ErrorBanner error=error on_retry=Callback::new(move |_| reload()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Timestamp"</TableHeaderCell>
                                <TableHeaderCell>"Admin"</TableHeaderCell>
                                <TableHeaderCell>"Action"</TableHeaderCell>
                                <TableHeaderCell>"Entity"</TableHeaderCell>
                                <TableHeaderCell>"Reason"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let rows = state.with(|s| s.logs.clone());
                                if rows.is_empty() {
                                    let text = if loading.get() { "Loading audit logs..." } else { "No audit logs found" };
                                    return view! {
                                        <tr><td colspan="6" class="table__empty">{text}</td></tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|entry| {
                                    let short_entity: String = entry.entity_id.chars().take(8).collect();
                                    let reason = entry.reason.clone().unwrap_or_else(|| "—".to_string());
                                    let for_modal = entry.clone();
                                    let created_at = format_timestamp(&entry.created_at);
                                    let admin_name = entry.admin_name();
                                    let action = entry.action.clone();
                                    let entity_label = entry.entity_type.label();
                                    view! {
                                        <TableRow>
                                            <TableCell>{created_at}</TableCell>
                                            <TableCell>{admin_name}</TableCell>
                                            <TableCell>
                                                <StatusBadge variant="primary" label=action />
                                            </TableCell>
                                            <TableCell>
                                                {entity_label}
                                                <span class="mono text-muted">{format!(" {}…", short_entity)}</span>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{reason}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| selected_log.set(Some(for_modal.clone()))
                                                >
                                                    {icon("eye")}
                                                    " Details"
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

            {move || selected_log.get().map(|entry| view! {
                <AuditLogDetailModal log=entry on_close=Callback::new(move |_| selected_log.set(None)) />
            })}
        </PageFrame>
    }
}
