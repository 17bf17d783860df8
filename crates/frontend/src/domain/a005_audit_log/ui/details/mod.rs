//! Детали записи журнала: старые/новые значения, данные запроса и история
//! той же сущности (`GET /api/admin/audit-logs/:entity_type/:entity_id`).

use crate::domain::a005_audit_log::api;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::modal::Modal;
use crate::shared::date_utils::format_timestamp;
use crate::shared::query_cache::use_query_client;
use contracts::domain::a005_audit_log::{pretty_values, AuditLog};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// `null` и `{}` не показываются
fn has_content(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

#[component]
pub fn AuditLogDetailModal(log: AuditLog, on_close: Callback<()>) -> impl IntoView {
    let client = use_query_client();
    let (entity_type, entity_id) = (log.entity_type, log.entity_id.clone());
    let current = RwSignal::new(log);
    let history = RwSignal::new(Vec::<AuditLog>::new());
    let history_error = RwSignal::new(None::<String>);

    spawn_local(async move {
        let key = api::entity_history_key(entity_type, &entity_id);
        match client
            .fetch(key, api::fetch_entity_history(entity_type, &entity_id))
            .await
        {
            Some(Ok(logs)) => history.set(logs),
            Some(Err(e)) => {
                log::warn!("Failed to load history for {} {}: {}", entity_type.as_str(), entity_id, e);
                history_error.set(Some(e.user_message()));
            }
            None => {}
        }
    });

    view! {
        <Modal title="Audit log details" on_close=on_close wide=true>
            {move || log_body(current.get())}

            <div class="detail-section">
                <h4>"Entity history"</h4>
                {move || history_error.get().map(|e| view! { <p class="alert alert--error">{e}</p> })}
                {move || {
                    let items = history.get();
                    if items.is_empty() {
                        return view! { <p class="text-muted">"No other entries for this entity"</p> }.into_any();
                    }
                    let selected_id = current.with(|c| c.id.clone());
                    view! {
                        <ul class="timeline">
                            {items.into_iter().map(|entry| {
                                let is_current = entry.id == selected_id;
                                let label = format!("{} · {}", entry.action_label(), entry.admin_name());
                                let time = format_timestamp(&entry.created_at);
                                view! {
                                    <li
                                        class="timeline__item timeline__item--clickable"
                                        class:timeline__item--active=is_current
                                        on:click=move |_| current.set(entry.clone())
                                    >
                                        <div class="timeline__header">
                                            <strong>{label}</strong>
                                            <span class="timeline__time">{time}</span>
                                        </div>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            </div>
        </Modal>
    }
}

fn log_body(log: AuditLog) -> impl IntoView {
    let admin_email = log
        .admin
        .as_ref()
        .and_then(|a| a.email.clone())
        .unwrap_or_default();

    view! {
        <div class="detail-section">
            <div class="detail-fields">
                <div class="detail-field">
                    <span class="detail-field__label">"Action"</span>
                    <span class="detail-field__value">
                        <StatusBadge variant="primary" label=log.action_label() />
                    </span>
                </div>
                <div class="detail-field">
                    <span class="detail-field__label">"Admin"</span>
                    <span class="detail-field__value">
                        {log.admin_name()}
                        {(!admin_email.is_empty()).then(|| view! { <span class="text-muted">{format!(" ({})", admin_email)}</span> })}
                    </span>
                </div>
                <div class="detail-field">
                    <span class="detail-field__label">"Entity"</span>
                    <span class="detail-field__value">
                        {log.entity_type.label()}
                        <span class="mono">{format!(" {}", log.entity_id)}</span>
                    </span>
                </div>
                <div class="detail-field">
                    <span class="detail-field__label">"Timestamp"</span>
                    <span class="detail-field__value">{format_timestamp(&log.created_at)}</span>
                </div>
            </div>
        </div>

        {log.reason.clone().filter(|r| !r.trim().is_empty()).map(|reason| view! {
            <div class="detail-section">
                <h4>"Reason"</h4>
                <p class="detail-text">{reason}</p>
            </div>
        })}

        {has_content(log.old_values.as_ref()).then(|| view! {
            <div class="detail-section">
                <h4>"Old values"</h4>
                <pre class="json-view json-view--old">{pretty_values(log.old_values.as_ref())}</pre>
            </div>
        })}

        {has_content(log.new_values.as_ref()).then(|| view! {
            <div class="detail-section">
                <h4>"New values"</h4>
                <pre class="json-view json-view--new">{pretty_values(log.new_values.as_ref())}</pre>
            </div>
        })}

        {(log.ip_address.is_some() || log.user_agent.is_some()).then(|| view! {
            <div class="detail-section">
                <h4>"Request information"</h4>
                <div class="detail-fields">
                    {log.ip_address.clone().map(|ip| view! {
                        <div class="detail-field">
                            <span class="detail-field__label">"IP address"</span>
                            <span class="detail-field__value mono">{ip}</span>
                        </div>
                    })}
                    {log.user_agent.clone().map(|ua| view! {
                        <div class="detail-field">
                            <span class="detail-field__label">"User agent"</span>
                            <span class="detail-field__value">{ua}</span>
                        </div>
                    })}
                </div>
            </div>
        })}

        {has_content(log.metadata.as_ref()).then(|| view! {
            <div class="detail-section">
                <h4>"Metadata"</h4>
                <pre class="json-view">{pretty_values(log.metadata.as_ref())}</pre>
            </div>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_content_skips_empty() {
        assert!(!has_content(None));
        assert!(!has_content(Some(&json!(null))));
        assert!(!has_content(Some(&json!({}))));
        assert!(has_content(Some(&json!({"suspended": true}))));
        assert!(has_content(Some(&json!([1]))));
    }
}
