//! Tab registry - единственный источник правды для маппинга tab.key → View.

use super::tab_labels::DISPUTE_DETAIL_PREFIX;
use crate::dashboards::d400_overview::ui::OverviewDashboard;
use crate::dashboards::d401_reports::ui::ReportsPage;
use crate::domain::a001_dispute::ui::details::DisputeDetails;
use crate::domain::a001_dispute::ui::list::DisputeList;
use crate::domain::a002_user::ui::list::UserList;
use crate::domain::a003_team::ui::list::TeamList;
use crate::domain::a004_venue::ui::list::VenueList;
use crate::domain::a005_audit_log::ui::list::AuditLogList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::guard::RequireAdmin;
use crate::system::test_report::ui::TestReportPage;
use leptos::prelude::*;

/// Контент таба по ключу; все страницы закрыты `RequireAdmin`
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key = StoredValue::new(key.to_string());
    view! {
        <RequireAdmin>
            {tab_body(&key.get_value(), tabs_store)}
        </RequireAdmin>
    }
    .into_any()
}

fn tab_body(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        "d400_overview" => view! { <OverviewDashboard /> }.into_any(),
        "d401_reports" => view! { <ReportsPage /> }.into_any(),

        "a001_dispute" => view! { <DisputeList /> }.into_any(),
        k if k.starts_with(DISPUTE_DETAIL_PREFIX) => {
            let id = k[DISPUTE_DETAIL_PREFIX.len()..].to_string();
            let key_for_close = k.to_string();
            view! {
                <DisputeDetails
                    id=id
                    on_close=Callback::new(move |_| tabs_store.close_tab(&key_for_close))
                />
            }
            .into_any()
        }

        "a002_user" => view! { <UserList /> }.into_any(),
        "a003_team" => view! { <TeamList /> }.into_any(),
        "a004_venue" => view! { <VenueList /> }.into_any(),
        "a004_venue_unverified" => {
            view! { <VenueList initial_verified="false" /> }.into_any()
        }
        "a005_audit_log" => view! { <AuditLogList /> }.into_any(),

        "sys_test_report" => view! { <TestReportPage /> }.into_any(),

        other => {
            log::warn!("Unknown tab key: {}", other);
            let text = format!("Unknown page: {}", other);
            view! { <div class="alert alert--error">{text}</div> }.into_any()
        }
    }
}
