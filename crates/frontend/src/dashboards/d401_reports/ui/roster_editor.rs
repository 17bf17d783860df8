//! Редактор состава команды на вкладке Teams.
//!
//! Ответ 400 (например, лимит капитанов) показывается текстом сервера,
//! список участников при этом не меняется.

use crate::domain::a003_team::api;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::modal::ConfirmDialog;
use crate::shared::date_utils::format_timestamp_opt;
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;
use crate::shared::query_cache::use_query_client;
use contracts::domain::a003_team::{
    AddMemberRequest, MemberRole, TeamMember, TeamReportRow, TeamRoster, UpdateTeamRequest,
    MAX_CAPTAINS, TEAM_ZONES,
};
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Copy)]
struct TeamForm {
    nombre: RwSignal<String>,
    zona: RwSignal<String>,
    nivel: RwSignal<String>,
    descripcion: RwSignal<String>,
}

impl TeamForm {
    fn new() -> Self {
        Self {
            nombre: RwSignal::new(String::new()),
            zona: RwSignal::new(String::new()),
            nivel: RwSignal::new(String::new()),
            descripcion: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, roster: &TeamRoster) {
        self.nombre.set(roster.nombre.clone());
        self.zona.set(roster.zona.clone());
        self.nivel.set(roster.nivel.clone().unwrap_or_default());
        self.descripcion.set(roster.descripcion.clone().unwrap_or_default());
    }

    fn diff(&self, roster: &TeamRoster) -> UpdateTeamRequest {
        UpdateTeamRequest::diff(
            roster,
            &self.nombre.get(),
            &self.zona.get(),
            &self.nivel.get(),
            &self.descripcion.get(),
        )
    }
}

#[component]
pub fn TeamRosterEditor() -> impl IntoView {
    let client = use_query_client();
    let notifier = use_notifier();

    let teams = RwSignal::new(Vec::<TeamReportRow>::new());
    let list_error = RwSignal::new(None::<ApiError>);
    let selected = RwSignal::new(None::<String>);
    let roster = RwSignal::new(None::<TeamRoster>);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let removing = RwSignal::new(None::<TeamMember>);

    let form = TeamForm::new();
    let member_email = RwSignal::new(String::new());
    let member_role = RwSignal::new(MemberRole::Member.as_str().to_string());

    let load_list = move || {
        spawn_local(async move {
            match client.fetch(api::roster_list_key(), api::fetch_roster_list()).await {
                Some(Ok(rows)) => {
                    teams.set(rows);
                    list_error.set(None);
                }
                Some(Err(e)) => {
                    log::error!("Failed to load teams report: {}", e);
                    list_error.set(Some(e));
                }
                None => {}
            }
        });
    };

    let load_roster = move |id: String| {
        spawn_local(async move {
            match client.fetch(api::roster_key(&id), api::fetch_roster(&id)).await {
                Some(Ok(r)) => {
                    // Пока шёл запрос, могли выбрать другую команду
                    if selected.with_untracked(|s| s.as_deref() == Some(id.as_str())) {
                        form.fill(&r);
                        roster.set(Some(r));
                    }
                }
                Some(Err(e)) => {
                    log::warn!("Failed to load roster {}: {}", id, e);
                    error.set(Some(e.to_string()));
                }
                None => {}
            }
        });
    };

    Effect::new(move |_| {
        client.epoch_for(&api::teams_root());
        load_list();
    });

    Effect::new(move |_| {
        client.epoch_for(&api::teams_root());
        if let Some(id) = selected.get() {
            load_roster(id);
        }
    });

    let select_team = move |id: String| {
        error.set(None);
        roster.set(None);
        selected.set(Some(id));
    };

    let is_dirty = Signal::derive(move || {
        roster.with(|r| r.as_ref().map(|r| !form.diff(r).is_empty()).unwrap_or(false))
    });

    let save = move || {
        let Some(current) = roster.get_untracked() else {
            return;
        };
        let request = untrack(|| form.diff(&current));
        if request.is_empty() {
            return;
        }
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::update_team(&current.id, &request).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    log::info!("Team {} updated", current.id);
                    notifier.success("Team updated");
                    client.invalidate(&api::teams_root());
                }
                Err(e) => {
                    log::warn!("Failed to update team {}: {}", current.id, e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let add_member = move || {
        let Some(team_id) = selected.get_untracked() else {
            return;
        };
        let role = MemberRole::parse(&member_role.get_untracked()).unwrap_or(MemberRole::Member);
        let request = match AddMemberRequest::new(&member_email.get_untracked(), role) {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::add_member(&team_id, &request).await;
            busy.set(false);
            match result {
                Ok(members) => {
                    roster.update(|r| {
                        if let Some(r) = r {
                            r.members = members;
                        }
                    });
                    member_email.set(String::new());
                    notifier.success(format!("{} added to the team", request.email));
                    client.invalidate(&api::teams_root());
                }
                Err(e) => {
                    log::warn!("Failed to add {} to team {}: {}", request.email, team_id, e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let confirm_remove = move || {
        let (Some(team_id), Some(member)) = (selected.get_untracked(), removing.get_untracked())
        else {
            return;
        };
        busy.set(true);
        spawn_local(async move {
            let result = api::remove_member(&team_id, &member.user_id).await;
            busy.set(false);
            removing.set(None);
            match result {
                Ok(()) => {
                    roster.update(|r| {
                        if let Some(r) = r {
                            r.members.retain(|m| m.user_id != member.user_id);
                        }
                    });
                    notifier.success(format!("{} removed from the team", member.display_name()));
                    client.invalidate(&api::teams_root());
                }
                Err(e) => {
                    log::warn!("Failed to remove {} from team {}: {}", member.user_id, team_id, e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="roster-editor">
            <ErrorBanner error=list_error on_retry=Callback::new(move |_| load_list()) />

            <div class="roster-editor__list table-wrapper">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Team"</TableHeaderCell>
                            <TableHeaderCell>"Zone"</TableHeaderCell>
                            <TableHeaderCell>"Level"</TableHeaderCell>
                            <TableHeaderCell>"Members"</TableHeaderCell>
                            <TableHeaderCell>"Captain"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let rows = teams.get();
                            if rows.is_empty() {
                                return view! {
                                    <tr><td colspan="5" class="table__empty">"No teams found"</td></tr>
                                }.into_any();
                            }
                            rows.into_iter().map(|row| {
                                let id = row.id.clone();
                                let row_id = row.id.clone();
                                let captain = row.capitan_nombre.clone().unwrap_or_else(|| "—".to_string());
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <a
                                                href="#"
                                                class="table__link"
                                                class:table__link--active=move || {
                                                    selected.with(|s| s.as_deref() == Some(row_id.as_str()))
                                                }
                                                on:click=move |ev| {
                                                    ev.prevent_default();
                                                    select_team(id.clone());
                                                }
                                            >
                                                {row.nombre.clone()}
                                            </a>
                                        </TableCell>
                                        <TableCell>{row.zona.clone()}</TableCell>
                                        <TableCell>{row.nivel.clone().unwrap_or_default()}</TableCell>
                                        <TableCell>{row.member_count}</TableCell>
                                        <TableCell>{captain}</TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            </div>

            {move || roster.get().map(|r| {
                let slots_left = r.captain_slots_left();
                let members = r.members.clone();
                view! {
                    <div class="roster-editor__panel detail-section">
                        <h3 class="detail-section__title">{icon("shield")}" "{r.nombre.clone()}</h3>

                        {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                        <div class="form__grid">
                            <div class="form__group">
                                <label class="form__label">"Name"</label>
                                <Input value=form.nombre />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Zone"</label>
                                <select
                                    class="form__select"
                                    prop:value=move || form.zona.get()
                                    on:change=move |ev| form.zona.set(event_target_value(&ev))
                                >
                                    {TEAM_ZONES.into_iter().map(|z| view! {
                                        <option value=z selected=move || form.zona.get() == z>{z}</option>
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Level"</label>
                                <Input value=form.nivel />
                            </div>
                            <div class="form__group form__group--wide">
                                <label class="form__label">"Description"</label>
                                <Textarea value=form.descripcion />
                            </div>
                        </div>
                        <div class="form__actions">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| save()
                                disabled=Signal::derive(move || busy.get() || !is_dirty.get())
                            >
                                "Save changes"
                            </Button>
                        </div>

                        <h4 class="detail-section__subtitle">
                            {format!("Members ({}) · captain slots left: {} of {}", members.len(), slots_left, MAX_CAPTAINS)}
                        </h4>
                        <div class="table-wrapper">
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"Name"</TableHeaderCell>
                                        <TableHeaderCell>"Email"</TableHeaderCell>
                                        <TableHeaderCell>"Role"</TableHeaderCell>
                                        <TableHeaderCell>"Joined"</TableHeaderCell>
                                        <TableHeaderCell>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {if members.is_empty() {
                                        view! {
                                            <tr><td colspan="5" class="table__empty">"No members yet"</td></tr>
                                        }.into_any()
                                    } else {
                                        members.into_iter().map(|m| {
                                            let (variant, role) = match MemberRole::parse(&m.role) {
                                                Some(MemberRole::Capitan) => ("info", MemberRole::Capitan.label().to_string()),
                                                Some(role) => ("neutral", role.label().to_string()),
                                                None => ("neutral", m.role.clone()),
                                            };
                                            let target = m.clone();
                                            let display_name = m.display_name();
                                            let display_email = m.display_email().unwrap_or_default();
                                            let joined_at = format_timestamp_opt(m.joined_at.as_ref());
                                            view! {
                                                <TableRow>
                                                    <TableCell>{display_name}</TableCell>
                                                    <TableCell>{display_email}</TableCell>
                                                    <TableCell><StatusBadge variant=variant label=role /></TableCell>
                                                    <TableCell>{joined_at}</TableCell>
                                                    <TableCell>
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            on_click=move |_| removing.set(Some(target.clone()))
                                                            disabled=busy
                                                        >
                                                            {icon("trash")}
                                                        </Button>
                                                    </TableCell>
                                                </TableRow>
                                            }
                                        }).collect_view().into_any()
                                    }}
                                </TableBody>
                            </Table>
                        </div>

                        <div class="roster-editor__add">
                            <Input value=member_email placeholder="user@example.com" />
                            <select
                                class="form__select"
                                prop:value=move || member_role.get()
                                on:change=move |ev| member_role.set(event_target_value(&ev))
                            >
                                {MemberRole::ALL.into_iter().map(|role| view! {
                                    <option value=role.as_str()>{role.label()}</option>
                                }).collect_view()}
                            </select>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| add_member()
                                disabled=busy
                            >
                                {icon("user-plus")}
                                " Add member"
                            </Button>
                        </div>
                    </div>
                }
            })}

            {move || removing.get().map(|m| view! {
                <ConfirmDialog
                    title="Remove member"
                    message=format!("Remove {} from the team?", m.display_name())
                    confirm_label="Remove"
                    destructive=true
                    busy=busy
                    on_confirm=Callback::new(move |_| confirm_remove())
                    on_cancel=Callback::new(move |_| removing.set(None))
                />
            })}
        </div>
    }
}
