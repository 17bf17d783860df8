use crate::domain::a003_team::api;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::modal::Modal;
use crate::shared::date_utils::{format_timestamp, format_timestamp_opt};
use crate::shared::query_cache::use_query_client;
use contracts::domain::a003_team::TeamDetail;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Карточка команды с составом (только чтение; правка состава в отчётах)
#[component]
pub fn TeamDetailsModal(id: String, on_close: Callback<()>) -> impl IntoView {
    let client = use_query_client();
    let team = RwSignal::new(None::<TeamDetail>);
    let error = RwSignal::new(None::<ApiError>);
    let id = StoredValue::new(id);

    let load = move || {
        let id = id.get_value();
        let key = api::detail_key(&id);
        if let Some(cached) = client.peek::<TeamDetail>(&key) {
            team.set(Some(cached));
        }
        spawn_local(async move {
            match client.fetch(key, api::fetch_team(&id)).await {
                Some(Ok(detail)) => {
                    team.set(Some(detail));
                    error.set(None);
                }
                Some(Err(e)) => {
                    log::error!("Failed to load team {}: {}", id, e);
                    error.set(Some(e));
                }
                None => {}
            }
        });
    };

    Effect::new(move |_| {
        client.epoch_for(&api::teams_root());
        load();
    });

    view! {
        <Modal title="Team details" on_close=on_close wide=true>
            <ErrorBanner error=error on_retry=Callback::new(move |_| load()) />
            {move || match team.get() {
                None => view! { <p class="text-muted">"Loading..."</p> }.into_any(),
                Some(t) => {
                    let (variant, label) = if t.suspended { ("error", "Suspended") } else { ("success", "Active") };
                    let captain = t.capitan.as_ref().map(|c| c.display_name().to_string()).unwrap_or_else(|| "—".to_string());
                    view! {
                        <div class="detail-section">
                            <div class="detail-section__title">
                                <h3>{t.nombre.clone()}</h3>
                                <StatusBadge variant=variant label=label />
                            </div>
                            <div class="detail-fields">
                                <div class="detail-field">
                                    <span class="detail-field__label">"Zone"</span>
                                    <span class="detail-field__value">{t.zona.clone()}</span>
                                </div>
                                <div class="detail-field">
                                    <span class="detail-field__label">"Level"</span>
                                    <span class="detail-field__value">{t.nivel.clone().unwrap_or_else(|| "—".to_string())}</span>
                                </div>
                                <div class="detail-field">
                                    <span class="detail-field__label">"Captain"</span>
                                    <span class="detail-field__value">{captain}</span>
                                </div>
                                <div class="detail-field">
                                    <span class="detail-field__label">"Created"</span>
                                    <span class="detail-field__value">{format_timestamp(&t.created_at)}</span>
                                </div>
                            </div>
                        </div>
                        <div class="detail-section">
                            <h4>{format!("Members ({})", t.members.len())}</h4>
                            <table class="simple-table">
                                <thead>
                                    <tr><th>"Name"</th><th>"Email"</th><th>"Role"</th><th>"Joined"</th></tr>
                                </thead>
                                <tbody>
                                    {t.members.iter().map(|m| view! {
                                        <tr>
                                            <td>{m.display_name()}</td>
                                            <td>{m.display_email().unwrap_or_default()}</td>
                                            <td>
                                                {if m.is_captain() {
                                                    view! { <StatusBadge variant="primary" label="Captain" /> }.into_any()
                                                } else {
                                                    view! { <span>"Member"</span> }.into_any()
                                                }}
                                            </td>
                                            <td>{format_timestamp_opt(m.joined_at.as_ref())}</td>
                                        </tr>
                                    }).collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }
                    .into_any()
                }
            }}
        </Modal>
    }
}
