pub mod state;

use self::state::create_state;
use super::details::TeamDetailsModal;
use crate::domain::a003_team::api;
use crate::domain::common::{ModerationDialog, ModerationState};
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_select::FilterSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::sortable_header::SortableHeader;
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::query_cache::use_query_client;
use contracts::domain::a003_team::{Team, TeamsResponse, TEAM_ZONES};
use contracts::domain::common::{ModerationAction, ModerationRequest};
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn TeamList() -> impl IntoView {
    let state = create_state();
    let client = use_query_client();
    let moderation = ModerationState::new();

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (is_filter_expanded, set_is_filter_expanded) = signal(true);
    let search_input = RwSignal::new(String::new());
    let selected_team = RwSignal::new(None::<String>);

    let query = Memo::new(move |_| state.with(|s| s.query.clone()));

    let load = move |query: ListQuery| {
        let key = api::list_key(&query);
        if let Some(cached) = client.peek::<TeamsResponse>(&key) {
            state.update(|s| s.apply_page(cached.teams, cached.total));
        }
        set_loading.set(true);
        spawn_local(async move {
            let requested = query.clone();
            let Some(result) = client.fetch(key, api::fetch_teams(&query)).await else {
                return;
            };
            if !state.with_untracked(|s| s.query == requested) {
                return;
            }
            match result {
                Ok(resp) => {
                    state.update(|s| s.apply_page(resp.teams, resp.total));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load teams: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        let q = query.get();
        client.epoch_for(&api::teams_root());
        load(q);
    });

    let reload = move || load(query.get_untracked());

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
        state.with(|s| s.query.filters.len() + usize::from(!s.query.search.is_empty()))
    });

    let zone_options: Vec<(&'static str, &'static str)> =
        TEAM_ZONES.iter().map(|z| (*z, *z)).collect();
    let status_options = vec![("false", "Active"), ("true", "Suspended")];
    let zone_options = StoredValue::new(zone_options);
    let status_options = StoredValue::new(status_options);

    let submit_moderation = Callback::new(move |request: ModerationRequest| {
        let Some(id) = moderation.target.with_untracked(|t| t.as_ref().map(|t| t.id.clone())) else {
            return;
        };
        moderation.submit("Team", api::teams_root(), api::moderate_team(id, request));
    });

    view! {
        <PageFrame page_id="a003_team--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("shield")}
                    <h1 class="page__title">"Teams"</h1>
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
                                        <Input value=search_input placeholder="Team name..." />
                                    </Flex>
                                </div>
                                <Button appearance=ButtonAppearance::Secondary on_click=move |_| apply_search()>
                                    "Search"
                                </Button>
                                <FilterSelect
                                    label="Zone"
                                    value=filter_value("zona")
                                    options=zone_options.get_value()
                                    on_change=set_filter("zona")
                                />
                                <FilterSelect
                                    label="Status"
                                    value=filter_value("suspended")
                                    options=status_options.get_value()
                                    on_change=set_filter("suspended")
                                />
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
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"ID"</TableHeaderCell>
                                <SortableHeader label="Team Name" sort_key="nombre" query=query on_sort=on_sort />
                                <TableHeaderCell>"Captain"</TableHeaderCell>
                                <TableHeaderCell>"Zone"</TableHeaderCell>
                                <TableHeaderCell>"Members"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <SortableHeader label="Created" sort_key="created_at" query=query on_sort=on_sort />
                                <TableHeaderCell>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let rows = state.with(|s| s.teams.clone());
                                if rows.is_empty() {
                                    let text = if loading.get() { "Loading teams..." } else { "No teams found" };
                                    return view! {
                                        <tr><td colspan="8" class="table__empty">{text}</td></tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|t| team_row(t, selected_team, moderation)).collect_view().into_any()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>

            {move || selected_team.get().map(|id| view! {
                <TeamDetailsModal id=id on_close=Callback::new(move |_| selected_team.set(None)) />
            })}

            {move || moderation.target.get().map(|target| {
                let hide_notes = target.action == ModerationAction::Activate;
                view! {
                    <ModerationDialog
                        entity="Team"
                        target=target
                        hide_notes=hide_notes
                        busy=moderation.busy
                        server_error=moderation.error
                        on_submit=submit_moderation
                        on_cancel=Callback::new(move |_| moderation.close())
                    />
                }
            })}
        </PageFrame>
    }
}

fn team_row(t: Team, selected: RwSignal<Option<String>>, moderation: ModerationState) -> impl IntoView {
    let (id_open, id_action, name) = (t.id.clone(), t.id.clone(), t.nombre.clone());
    let action = if t.suspended {
        ModerationAction::Activate
    } else {
        ModerationAction::Suspend
    };
    let short_id: String = t.id.chars().take(8).collect();
    let captain = t
        .capitan
        .as_ref()
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| "—".to_string());
    let variant = if t.suspended { "error" } else { "success" };
    let nombre = t.nombre.clone();
    let zona = t.zona.clone();
    let members_count = t.members_count;
    let status_label = t.status_label();
    let created_at = format_timestamp(&t.created_at);

    view! {
        <TableRow>
            <TableCell>
                <span class="mono">{format!("{}...", short_id)}</span>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    <a
                        href="#"
                        class="table__link"
                        on:click=move |ev| {
                            ev.prevent_default();
                            selected.set(Some(id_open.clone()));
                        }
                    >
                        {nombre}
                    </a>
                </TableCellLayout>
            </TableCell>
            <TableCell>{captain}</TableCell>
            <TableCell>{zona}</TableCell>
            <TableCell>{members_count}</TableCell>
            <TableCell>
                <StatusBadge variant=variant label=status_label />
            </TableCell>
            <TableCell>{created_at}</TableCell>
            <TableCell>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| moderation.open(&id_action, &name, action)
                >
                    {icon(if action == ModerationAction::Suspend { "pause" } else { "play" })}
                    {format!(" {}", action.title())}
                </Button>
            </TableCell>
        </TableRow>
    }
}
