use super::report_view::{export_report, render_report, ExportFormat};
use super::roster_editor::TeamRosterEditor;
use crate::dashboards::d401_reports::api::{self, DateRange, ReportData};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::date_utils::parse_input_date;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use crate::shared::query_cache::use_query_client;
use contracts::dashboards::d401_reports::ReportTab;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ReportsPage() -> impl IntoView {
    let client = use_query_client();

    let active_tab = RwSignal::new(ReportTab::Overview);
    let report = RwSignal::new(None::<ReportData>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<ApiError>);

    // Период бронирований: сырые значения <input type="date">
    let start_input = RwSignal::new(String::new());
    let end_input = RwSignal::new(String::new());
    let range = RwSignal::new(DateRange::default());
    let range_error = RwSignal::new(None::<String>);

    let load = move |tab: ReportTab, range: DateRange| {
        let key = api::report_key(tab, &range);
        report.set(client.peek::<ReportData>(&key));
        loading.set(true);
        spawn_local(async move {
            let Some(result) = client.fetch(key, api::fetch_report(tab, range)).await else {
                return;
            };
            // Ответ для вкладки, с которой уже ушли, не показываем
            if active_tab.get_untracked() != tab {
                return;
            }
            match result {
                Ok(data) => {
                    report.set(Some(data));
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load {} report: {}", tab.as_str(), e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        client.epoch_for(&api::reports_root());
        load(active_tab.get(), range.get());
    });

    let switch_tab = move |tab: ReportTab| {
        if active_tab.get_untracked() != tab {
            report.set(None);
            error.set(None);
            active_tab.set(tab);
        }
    };

    let apply_range = move || {
        let candidate = DateRange {
            start: parse_input_date(&start_input.get_untracked()),
            end: parse_input_date(&end_input.get_untracked()),
        };
        match candidate.validate() {
            Ok(()) => {
                range_error.set(None);
                range.set(candidate);
            }
            Err(msg) => range_error.set(Some(msg)),
        }
    };

    let clear_range = move || {
        start_input.set(String::new());
        end_input.set(String::new());
        range_error.set(None);
        range.set(DateRange::default());
    };

    let export = move |format: ExportFormat| {
        let tab = active_tab.get_untracked();
        report.with_untracked(|data| match data {
            Some(data) => export_report(data, tab, format),
            None => log::warn!("Nothing to export for {} yet", tab.as_str()),
        });
    };

    let has_report = Signal::derive(move || report.with(Option::is_some));

    view! {
        <PageFrame page_id="d401_reports--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("file-text")}
                    <h1 class="page__title">"Reports"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| export(ExportFormat::Csv)
                        disabled=Signal::derive(move || !has_report.get())
                    >
                        {icon("download")}
                        " Export CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| export(ExportFormat::Pdf)
                        disabled=Signal::derive(move || !has_report.get())
                    >
                        {icon("printer")}
                        " Export PDF"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load(active_tab.get_untracked(), range.get_untracked())
                        disabled=loading
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="page__tabs">
                {ReportTab::ALL.into_iter().map(|tab| view! {
                    <button
                        class="page__tab"
                        class:page__tab--active=move || active_tab.get() == tab
                        on:click=move |_| switch_tab(tab)
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </div>

            <div class="page__content">
                <Show when=move || active_tab.get() == ReportTab::Bookings>
                    <div class="filter-panel">
                        <div class="filter-field">
                            <label class="filter-field__label">"From"</label>
                            <input
                                type="date"
                                class="form__input"
                                prop:value=move || start_input.get()
                                on:change=move |ev| start_input.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="filter-field">
                            <label class="filter-field__label">"To"</label>
                            <input
                                type="date"
                                class="form__input"
                                prop:value=move || end_input.get()
                                on:change=move |ev| end_input.set(event_target_value(&ev))
                            />
                        </div>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| apply_range()>
                            "Apply"
                        </Button>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| clear_range()>
                            "Clear"
                        </Button>
                        {move || range_error.get().map(|e| view! { <span class="text-error">{e}</span> })}
                    </div>
                </Show>

                <ErrorBanner
                    error=error
                    on_retry=Callback::new(move |_| load(active_tab.get_untracked(), range.get_untracked()))
                />

                <div class="detail-section">
                    {move || match report.get() {
                        Some(data) => render_report(data),
                        None if loading.get() => view! { <p class="text-muted">"Loading..."</p> }.into_any(),
                        None => view! { <p class="text-muted">"No data"</p> }.into_any(),
                    }}
                </div>

                <Show when=move || active_tab.get() == ReportTab::Teams>
                    <TeamRosterEditor />
                </Show>
            </div>
        </PageFrame>
    }
}
