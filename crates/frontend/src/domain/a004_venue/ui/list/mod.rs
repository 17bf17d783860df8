pub mod state;

use self::state::create_state;
use super::details::VenueDetailsModal;
use crate::domain::a004_venue::api;
use crate::domain::common::{ModerationDialog, ModerationState};
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_select::FilterSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::sortable_header::SortableHeader;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::query_cache::use_query_client;
use contracts::domain::a004_venue::{Venue, VenueStatus, VenuesResponse};
use contracts::domain::common::{ModerationAction, ModerationRequest};
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn VenueList(
    /// Начальное значение фильтра `verified` ("true" / "false")
    #[prop(optional)]
    initial_verified: Option<&'static str>,
) -> impl IntoView {
    let state = create_state(initial_verified);
    let client = use_query_client();
    let moderation = ModerationState::new();

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (is_filter_expanded, set_is_filter_expanded) = signal(true);
    let search_input = RwSignal::new(String::new());
    let selected_venue = RwSignal::new(None::<String>);

    let query = Memo::new(move |_| state.with(|s| s.query.clone()));

    let load = move |query: ListQuery| {
        let key = api::list_key(&query);
        if let Some(cached) = client.peek::<VenuesResponse>(&key) {
            state.update(|s| s.apply_page(cached.venues, cached.total));
        }
        set_loading.set(true);
        spawn_local(async move {
            let requested = query.clone();
            let Some(result) = client.fetch(key, api::fetch_venues(&query)).await else {
                return;
            };
            if !state.with_untracked(|s| s.query == requested) {
                return;
            }
            match result {
                Ok(resp) => {
                    state.update(|s| s.apply_page(resp.venues, resp.total));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load venues: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        let q = query.get();
        client.epoch_for(&api::venues_root());
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

    let verified_options = vec![("true", "Verified"), ("false", "Unverified")];
    let suspended_options = vec![("false", "Active"), ("true", "Suspended")];
    let verified_options = StoredValue::new(verified_options);
    let suspended_options = StoredValue::new(suspended_options);

    let submit_moderation = Callback::new(move |request: ModerationRequest| {
        let Some(id) = moderation.target.with_untracked(|t| t.as_ref().map(|t| t.id.clone())) else {
            return;
        };
        moderation.submit("Venue", api::venues_root(), api::moderate_venue(id, request));
    });

    view! {
        <PageFrame page_id="a004_venue--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("map-pin")}
                    <h1 class="page__title">"Venues"</h1>
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
                                        <Input value=search_input placeholder="Venue name or address..." />
                                    </Flex>
                                </div>
                                <Button appearance=ButtonAppearance::Secondary on_click=move |_| apply_search()>
                                    "Search"
                                </Button>
                                <FilterSelect
                                    label="Verification"
                                    value=filter_value("verified")
                                    options=verified_options.get_value()
                                    on_change=set_filter("verified")
                                />
                                <FilterSelect
                                    label="Status"
                                    value=filter_value("suspended")
                                    options=suspended_options.get_value()
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
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeader label="Venue" sort_key="nombre" query=query on_sort=on_sort />
                                <TableHeaderCell>"Owner"</TableHeaderCell>
                                <SortableHeader label="Rating" sort_key="avg_rating" query=query on_sort=on_sort />
                                <TableHeaderCell>"Amenities"</TableHeaderCell>
                                <SortableHeader label="Price / hour" sort_key="precio_por_hora" query=query on_sort=on_sort />
                                <TableHeaderCell>"Capacity"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let rows = state.with(|s| s.venues.clone());
                                if rows.is_empty() {
                                    let text = if loading.get() { "Loading venues..." } else { "No venues found" };
                                    return view! {
                                        <tr><td colspan="8" class="table__empty">{text}</td></tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|v| venue_row(v, selected_venue, moderation)).collect_view().into_any()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>

            {move || selected_venue.get().map(|id| view! {
                <VenueDetailsModal id=id on_close=Callback::new(move |_| selected_venue.set(None)) />
            })}

            {move || moderation.target.get().map(|target| {
                let hide_notes = target.action == ModerationAction::Activate;
                view! {
                    <ModerationDialog
                        entity="Venue"
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

/// Доступные действия: verify только для активной неподтверждённой площадки
fn row_actions(status: VenueStatus) -> Vec<ModerationAction> {
    match status {
        VenueStatus::Unverified => vec![ModerationAction::Verify, ModerationAction::Suspend],
        VenueStatus::Verified => vec![ModerationAction::Suspend],
        VenueStatus::Suspended => vec![ModerationAction::Activate],
    }
}

fn action_icon(action: ModerationAction) -> &'static str {
    match action {
        ModerationAction::Verify => "check-circle",
        ModerationAction::Suspend => "pause",
        ModerationAction::Activate => "play",
        ModerationAction::Delete => "trash",
    }
}

fn venue_row(v: Venue, selected: RwSignal<Option<String>>, moderation: ModerationState) -> impl IntoView {
    let status = v.status();
    let id_open = v.id.clone();
    let amenities = v.amenities().join(", ");

    let actions = row_actions(status)
        .into_iter()
        .map(|action| {
            let (id, name) = (v.id.clone(), v.nombre.clone());
            view! {
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| moderation.open(&id, &name, action)
                >
                    {icon(action_icon(action))}
                    {format!(" {}", action.title())}
                </Button>
            }
        })
        .collect_view();
    let nombre = v.nombre.clone();
    let location = format!("{} · {}", v.direccion, v.zona);
    let owner_name = v.owner_name();
    let rating_label = v.rating_label();
    let precio = format!("${:.2}", v.precio_por_hora);
    let capacidad = v.capacidad;

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout truncate=true>
                    <div>
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
                        <div class="text-muted">{location}</div>
                    </div>
                </TableCellLayout>
            </TableCell>
            <TableCell>{owner_name}</TableCell>
            <TableCell>{rating_label}</TableCell>
            <TableCell>{if amenities.is_empty() { "—".to_string() } else { amenities }}</TableCell>
            <TableCell>{precio}</TableCell>
            <TableCell>{capacidad}</TableCell>
            <TableCell>
                <StatusBadge variant=status.badge_variant() label=status.label() />
            </TableCell>
            <TableCell>
                <Flex gap=FlexGap::Small>{actions}</Flex>
            </TableCell>
        </TableRow>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_actions_by_status() {
        assert_eq!(
            row_actions(VenueStatus::Unverified),
            vec![ModerationAction::Verify, ModerationAction::Suspend]
        );
        assert_eq!(row_actions(VenueStatus::Verified), vec![ModerationAction::Suspend]);
        assert_eq!(row_actions(VenueStatus::Suspended), vec![ModerationAction::Activate]);
    }
}
