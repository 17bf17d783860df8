use contracts::shared::api_error::ApiError;
use contracts::system::test_report::{CoverageSection, ProjectReport, TestReport};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::badge::StatusBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::test_report::api;

#[component]
fn CoverageRow(name: &'static str, section: CoverageSection) -> impl IntoView {
    let width = format!("width: {:.1}%;", section.width_percent());
    view! {
        <div class="coverage-row">
            <div class="coverage-row__header">
                <span class="coverage-row__name">{name}</span>
                <span class="coverage-row__value">{section.label()}</span>
            </div>
            <div class="coverage-bar">
                <div class="coverage-bar__fill" style=width></div>
            </div>
        </div>
    }
}

#[component]
fn ProjectCard(title: &'static str, report: ProjectReport) -> impl IntoView {
    let status = report.status;
    view! {
        <div class="card coverage-card">
            <div class="coverage-card__header">
                <h2>{title}</h2>
                <StatusBadge variant=status.badge_variant() label=status.as_str() />
            </div>
            {match report.coverage {
                Some(coverage) => coverage
                    .rows()
                    .into_iter()
                    .map(|(name, section)| view! { <CoverageRow name=name section=section /> })
                    .collect_view()
                    .into_any(),
                None => view! {
                    <p class="muted">"No coverage data available."</p>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
pub fn TestReportPage() -> impl IntoView {
    let report: RwSignal<Option<TestReport>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (loading, set_loading) = signal(false);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_test_report().await {
                Ok(data) => report.set(Some(data)),
                Err(e) => {
                    log::warn!("Failed to load test report: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    load();

    view! {
        <PageFrame page_id="sys_test_report--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Test Coverage Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <div class="alert alert--error">
                        <span>{format!("Failed to load test report: {}", e)}</span>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                            " Retry"
                        </Button>
                    </div>
                })}

                {move || report.get().map(|r| view! {
                    <p class="muted">{format!("Generated: {}", format_datetime(&r.generated_at))}</p>
                    <div class="coverage-grid">
                        <ProjectCard title="Frontend (Admin)" report=r.frontend.clone() />
                        <ProjectCard title="Backend API" report=r.backend.clone() />
                    </div>
                })}
            </div>
        </PageFrame>
    }
}
