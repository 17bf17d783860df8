pub mod state;

use self::state::create_state;
use super::details::UserDetailsModal;
use crate::domain::a002_user::api;
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
use contracts::domain::a002_user::{User, UserStatus, UsersResponse};
use contracts::domain::common::{ModerationAction, ModerationRequest};
use contracts::shared::api_error::ApiError;
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn UserList() -> impl IntoView {
    let state = create_state();
    let client = use_query_client();
    let moderation = ModerationState::new();

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (is_filter_expanded, set_is_filter_expanded) = signal(true);
    let search_input = RwSignal::new(String::new());
    let selected_user = RwSignal::new(None::<String>);

    let query = Memo::new(move |_| state.with(|s| s.query.clone()));

    let load = move |query: ListQuery| {
        let key = api::list_key(&query);
        if let Some(cached) = client.peek::<UsersResponse>(&key) {
            state.update(|s| s.apply_page(cached.users, cached.total));
        }
        set_loading.set(true);
        spawn_local(async move {
            let requested = query.clone();
            let Some(result) = client.fetch(key, api::fetch_users(&query)).await else {
                return;
            };
            if !state.with_untracked(|s| s.query == requested) {
                return;
            }
            match result {
                Ok(resp) => {
                    state.update(|s| s.apply_page(resp.users, resp.total));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load users: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        let q = query.get();
        client.epoch_for(&api::users_root());
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

    let status_options: Vec<(&'static str, &'static str)> = UserStatus::ALL
        .iter()
        .map(|s| (s.as_str(), s.label()))
        .collect();
    let role_options = vec![("true", "Admins"), ("false", "Regular users")];
    let status_options = StoredValue::new(status_options);
    let role_options = StoredValue::new(role_options);

    let submit_moderation = Callback::new(move |request: ModerationRequest| {
        let Some(id) = moderation.target.with_untracked(|t| t.as_ref().map(|t| t.id.clone())) else {
            return;
        };
        moderation.submit("User", api::users_root(), api::moderate_user(id, request));
    });

    view! {
        <PageFrame page_id="a002_user--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"Users"</h1>
                    {move || state.with(|s| s.is_loaded.then(|| view! {
                        <span class="page__subtitle">{format!("{} total", s.total)}</span>
                    }))}
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
                                        <Input value=search_input placeholder="Name or email" />
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
                                    label="Role"
                                    value=filter_value("is_admin")
                                    options=role_options.get_value()
                                    on_change=set_filter("is_admin")
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
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeader label="Name" sort_key="nombre" query=query on_sort=on_sort />
                                <SortableHeader label="Email" sort_key="email" query=query on_sort=on_sort />
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Role"</TableHeaderCell>
                                <TableHeaderCell>"Teams"</TableHeaderCell>
                                <TableHeaderCell>"Disputes (filed / against)"</TableHeaderCell>
                                <SortableHeader label="Joined" sort_key="created_at" query=query on_sort=on_sort />
                                <TableHeaderCell>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let rows = state.with(|s| s.users.clone());
                                if rows.is_empty() {
                                    let text = if loading.get() { "Loading users..." } else { "No users found" };
                                    return view! {
                                        <tr><td colspan="8" class="table__empty">{text}</td></tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|u| user_row(u, selected_user, moderation)).collect_view().into_any()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>

            {move || selected_user.get().map(|id| view! {
                <UserDetailsModal id=id on_close=Callback::new(move |_| selected_user.set(None)) />
            })}

            {move || moderation.target.get().map(|target| view! {
                <ModerationDialog
                    entity="User"
                    target=target
                    allow_duration=true
                    busy=moderation.busy
                    server_error=moderation.error
                    on_submit=submit_moderation
                    on_cancel=Callback::new(move |_| moderation.close())
                />
            })}
        </PageFrame>
    }
}

fn user_row(u: User, selected: RwSignal<Option<String>>, moderation: ModerationState) -> impl IntoView {
    let status = u.status();
    let id = u.id.clone();
    let name = u.display_name().to_string();

    let actions = match status {
        UserStatus::Deleted => view! { <span class="text-muted">"—"</span> }.into_any(),
        _ => {
            let (id_toggle, name_toggle) = (id.clone(), name.clone());
            let (id_delete, name_delete) = (id.clone(), name.clone());
            let toggle = if status == UserStatus::Suspended {
                ModerationAction::Activate
            } else {
                ModerationAction::Suspend
            };
            view! {
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| moderation.open(&id_toggle, &name_toggle, toggle)
                    >
                        {icon(if toggle == ModerationAction::Suspend { "pause" } else { "play" })}
                        {format!(" {}", toggle.title())}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        class="button--danger"
                        on_click=move |_| moderation.open(&id_delete, &name_delete, ModerationAction::Delete)
                    >
                        {icon("trash")}
                        " Delete"
                    </Button>
                </Flex>
            }
            .into_any()
        }
    };

    let disputes = format!("{} / {}", u.disputes_filed, u.disputes_against);
    let id_open = id.clone();

    view! {
        <TableRow>
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
                        {name.clone()}
                    </a>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {u.email.clone()}
                    {(!u.email_verified).then(|| view! { <span class="text-muted">" (unverified)"</span> })}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <StatusBadge variant=status.badge_variant() label=status.label() />
            </TableCell>
            <TableCell>
                {if u.is_admin {
                    view! { <StatusBadge variant="primary" label="Admin" /> }.into_any()
                } else {
                    view! { <span>"User"</span> }.into_any()
                }}
            </TableCell>
            <TableCell>{u.teams_count}</TableCell>
            <TableCell>{disputes}</TableCell>
            <TableCell>{format_timestamp(&u.created_at)}</TableCell>
            <TableCell>{actions}</TableCell>
        </TableRow>
    }
}
