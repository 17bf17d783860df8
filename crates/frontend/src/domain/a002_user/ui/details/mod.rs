//! Карточка пользователя в модальном окне: профиль, команды, последние действия.

use crate::domain::a002_user::api;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::modal::Modal;
use crate::shared::date_utils::format_timestamp;
use crate::shared::query_cache::use_query_client;
use contracts::domain::a002_user::UserDetail;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn UserDetailsModal(id: String, on_close: Callback<()>) -> impl IntoView {
    let client = use_query_client();
    let user = RwSignal::new(None::<UserDetail>);
    let error = RwSignal::new(None::<ApiError>);
    let id = StoredValue::new(id);

    let load = move || {
        let id = id.get_value();
        let key = api::detail_key(&id);
        if let Some(cached) = client.peek::<UserDetail>(&key) {
            user.set(Some(cached));
        }
        spawn_local(async move {
            match client.fetch(key, api::fetch_user(&id)).await {
                Some(Ok(detail)) => {
                    user.set(Some(detail));
                    error.set(None);
                }
                Some(Err(e)) => {
                    log::error!("Failed to load user {}: {}", id, e);
                    error.set(Some(e));
                }
                None => {}
            }
        });
    };

    Effect::new(move |_| {
        client.epoch_for(&api::users_root());
        load();
    });

    view! {
        <Modal title="User details" on_close=on_close wide=true>
            <ErrorBanner error=error on_retry=Callback::new(move |_| load()) />
            {move || match user.get() {
                None => view! { <p class="text-muted">"Loading..."</p> }.into_any(),
                Some(u) => user_body(u).into_any(),
            }}
        </Modal>
    }
}

fn user_body(u: UserDetail) -> impl IntoView {
    let status = u.status();
    let name = if u.nombre.trim().is_empty() {
        u.email.clone()
    } else {
        u.nombre.clone()
    };

    view! {
        <div class="detail-section">
            <div class="detail-section__title">
                <h3>{name}</h3>
                <StatusBadge variant=status.badge_variant() label=status.label() />
                {u.is_admin.then(|| view! { <StatusBadge variant="primary" label="Admin" /> })}
            </div>
            <div class="detail-fields">
                <div class="detail-field">
                    <span class="detail-field__label">"Email"</span>
                    <span class="detail-field__value">
                        {u.email.clone()}
                        {if u.email_verified { " ✓" } else { " (unverified)" }}
                    </span>
                </div>
                <div class="detail-field">
                    <span class="detail-field__label">"Phone"</span>
                    <span class="detail-field__value">{u.telefono.clone().unwrap_or_else(|| "—".to_string())}</span>
                </div>
                <div class="detail-field">
                    <span class="detail-field__label">"Joined"</span>
                    <span class="detail-field__value">{format_timestamp(&u.created_at)}</span>
                </div>
                {u.deleted_at.map(|d| view! {
                    <div class="detail-field">
                        <span class="detail-field__label">"Deleted"</span>
                        <span class="detail-field__value">{format_timestamp(&d)}</span>
                    </div>
                })}
            </div>
        </div>

        <div class="detail-section">
            <h4>{format!("Teams ({})", u.teams.len())}</h4>
            {if u.teams.is_empty() {
                view! { <p class="text-muted">"Not a member of any team"</p> }.into_any()
            } else {
                view! {
                    <table class="simple-table">
                        <thead>
                            <tr><th>"Team"</th><th>"Zone"</th><th>"Role"</th></tr>
                        </thead>
                        <tbody>
                            {u.teams.iter().map(|t| view! {
                                <tr>
                                    <td>{t.nombre.clone()}</td>
                                    <td>{t.zona.clone()}</td>
                                    <td>{t.rol.clone()}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            }}
        </div>

        <div class="detail-section">
            <h4>"Recent activity"</h4>
            {if u.recent_activity.is_empty() {
                view! { <p class="text-muted">"No recent activity"</p> }.into_any()
            } else {
                view! {
                    <ul class="timeline">
                        {u.recent_activity.iter().map(|a| view! {
                            <li class="timeline__item">
                                <div class="timeline__header">
                                    <strong>{a.action.replace('_', " ")}</strong>
                                    <span class="text-muted">{format!("{} {}", a.entity_type, a.entity_id)}</span>
                                    <span class="timeline__time">{format_timestamp(&a.created_at)}</span>
                                </div>
                            </li>
                        }).collect_view()}
                    </ul>
                }
                .into_any()
            }}
        </div>
    }
}
