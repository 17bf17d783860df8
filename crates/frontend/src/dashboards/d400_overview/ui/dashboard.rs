use crate::dashboards::d400_overview::api;
use crate::domain::a001_dispute::api as disputes_api;
use crate::domain::a002_user::api::users_root;
use crate::domain::a003_team::api::teams_root;
use crate::domain::a004_venue::api::venues_root;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use crate::shared::query_cache::use_query_client;
use contracts::dashboards::d400_overview::{
    format_money, ActivityItem, DashboardStats, DEFAULT_ACTIVITY_LIMIT,
};
use contracts::domain::a001_dispute::DisputeStats;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::charts::BarChart;

/// Быстрые переходы: (ключ таба, заголовок, подпись, иконка)
const QUICK_ACTIONS: [(&str, &str, &str, &str); 4] = [
    ("a001_dispute", "View Pending Disputes", "Review and resolve open disputes", "alert-triangle"),
    ("a004_venue_unverified", "Review New Venues", "Verify recently added venues", "map-pin"),
    ("d401_reports", "Reports", "Bookings, revenue and platform metrics", "bar-chart"),
    ("a005_audit_log", "View Audit Logs", "Recent admin actions", "clipboard"),
];

fn format_count(value: f64) -> String {
    format!("{}", value.round() as i64)
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let client = use_query_client();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let stats = RwSignal::new(None::<DashboardStats>);
    let dispute_stats = RwSignal::new(None::<DisputeStats>);
    let activity = RwSignal::new(Vec::<ActivityItem>::new());
    let error = RwSignal::new(None::<ApiError>);
    let loading = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match client.fetch(api::stats_key(), api::fetch_stats()).await {
                Some(Ok(s)) => {
                    stats.set(Some(s));
                    error.set(None);
                }
                Some(Err(e)) => {
                    log::error!("Failed to load dashboard stats: {}", e);
                    error.set(Some(e));
                }
                None => {}
            }
            loading.set(false);
        });
        spawn_local(async move {
            let key = api::activity_key(DEFAULT_ACTIVITY_LIMIT);
            match client.fetch(key, api::fetch_activity(DEFAULT_ACTIVITY_LIMIT)).await {
                Some(Ok(items)) => activity.set(items),
                Some(Err(e)) => log::warn!("Failed to load recent activity: {}", e),
                None => {}
            }
        });
        spawn_local(async move {
            match client.fetch(disputes_api::stats_key(), disputes_api::fetch_stats()).await {
                Some(Ok(s)) => dispute_stats.set(Some(s)),
                Some(Err(e)) => log::warn!("Failed to load dispute stats: {}", e),
                None => {}
            }
        });
    };

    // Сводка зависит от модерации во всех разделах
    Effect::new(move |_| {
        client.epoch_for(&api::dashboard_root());
        client.epoch_for(&disputes_api::disputes_root());
        client.epoch_for(&users_root());
        client.epoch_for(&teams_root());
        client.epoch_for(&venues_root());
        load();
    });

    let stat = move |f: fn(&DashboardStats) -> String| {
        Signal::derive(move || stats.with(|s| s.as_ref().map(f)))
    };

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("bar-chart")}
                    <h1 class="page__title">"Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner error=error on_retry=Callback::new(move |_| load()) />

                <div class="stat-grid">
                    <StatCard
                        label="Total Users"
                        icon_name="users"
                        value=stat(|s| s.total_users.to_string())
                        subtitle=stat(|s| format!("+{} this week", s.new_users_7d))
                    />
                    <StatCard
                        label="Active Teams"
                        icon_name="shield"
                        value=stat(|s| s.active_teams.to_string())
                    />
                    <StatCard
                        label="Venues"
                        icon_name="map-pin"
                        value=stat(|s| s.total_venues.to_string())
                        subtitle=stat(|s| format!("{} verified", s.verified_venues))
                    />
                    <StatCard
                        label="Bookings"
                        icon_name="calendar"
                        value=stat(|s| s.total_bookings.to_string())
                        subtitle=stat(|s| format!("{} completed matches", s.completed_matches))
                    />
                    <StatCard
                        label="Pending Disputes"
                        icon_name="alert-triangle"
                        value=stat(|s| s.pending_disputes.to_string())
                        subtitle=Signal::derive(move || dispute_stats.with(|d| d.as_ref().map(|d| {
                            format!("{} urgent · {} high", d.by_priority.urgent, d.by_priority.high)
                        })))
                        variant="warning"
                    />
                    <StatCard
                        label="Revenue (month)"
                        icon_name="dollar-sign"
                        value=stat(|s| format_money(s.revenue_month))
                        subtitle=stat(|s| format!("{} today", format_money(s.revenue_today)))
                        variant="success"
                    />
                </div>

                <div class="chart-grid">
                    <BarChart
                        title="Bookings"
                        bars=Signal::derive(move || stats.with(|s| s.as_ref().map(DashboardStats::bookings_bars).unwrap_or_default()))
                        format_value=format_count
                    />
                    <BarChart
                        title="Revenue"
                        bars=Signal::derive(move || stats.with(|s| s.as_ref().map(DashboardStats::revenue_bars).unwrap_or_default()))
                        format_value=format_money
                        variant="success"
                    />
                </div>

                <div class="dashboard-columns">
                    <div class="detail-section">
                        <h3 class="detail-section__title">{icon("activity")}" Recent Activity"</h3>
                        {move || {
                            let items = activity.get();
                            if items.is_empty() {
                                return view! { <p class="text-muted">"No recent activity"</p> }.into_any();
                            }
                            view! {
                                <ul class="activity-list">
                                    {items.into_iter().map(|item| {
                                        let who = item.user_data.as_ref().map(|u| u.nombre.clone()).unwrap_or_default();
                                        view! {
                                            <li class="activity-list__item">
                                                <span class="activity-list__icon">{icon(item.kind.icon_name())}</span>
                                                <div class="activity-list__body">
                                                    <div>{item.description.clone()}</div>
                                                    <div class="text-muted">
                                                        {(!who.is_empty()).then(|| format!("{} · ", who))}
                                                        {format_timestamp(&item.timestamp)}
                                                    </div>
                                                </div>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ul>
                            }
                            .into_any()
                        }}
                    </div>

                    <div class="detail-section">
                        <h3 class="detail-section__title">"Quick Actions"</h3>
                        <div class="quick-actions">
                            {QUICK_ACTIONS.into_iter().map(|(key, title, hint, icon_name)| view! {
                                <button
                                    class="quick-actions__item"
                                    on:click=move |_| tabs_store.open_tab(key, &tab_label_for_key(key))
                                >
                                    {icon(icon_name)}
                                    <div>
                                        <div class="quick-actions__title">{title}</div>
                                        <div class="text-muted">{hint}</div>
                                    </div>
                                </button>
                            }).collect_view()}
                        </div>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
