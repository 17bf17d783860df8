use super::comments::CommentsTimeline;
use super::evidence::EvidenceGallery;
use super::resolution_form::ResolutionForm;
use super::view_model::DisputeDetailsViewModel;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::date_utils::{format_date, format_timestamp, format_timestamp_opt};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_dispute::Dispute;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn DisputeDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let vm = DisputeDetailsViewModel::new();
    let id = StoredValue::new(id);

    // Перезагрузка при каждой инвалидации кэша (в т.ч. после своего действия)
    Effect::new(move |_| {
        let _ = vm.epoch();
        vm.load(id.get_value());
    });

    let title = move || {
        vm.dispute.with(|d| match d {
            Some(d) => format!("Dispute #{}", d.short_id()),
            None => "Dispute".to_string(),
        })
    };

    view! {
        <PageFrame page_id="a001_dispute--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("alert-triangle")}
                    <h1 class="page__title">{title}</h1>
                    {move || vm.dispute.with(|d| d.as_ref().map(|d| view! {
                        <StatusBadge variant=d.status.badge_variant() label=d.status.label() />
                    }))}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.load(id.get_value())
                        disabled=vm.loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner
                    error=vm.error
                    on_retry=Callback::new(move |_| vm.load(id.get_value()))
                />

                {move || {
                    match vm.dispute.get() {
                        Some(dispute) => view! {
                            <div class="detail-grid">
                                <div class="detail-grid__main">
                                    {overview_section(&dispute)}
                                    {parties_section(&dispute)}
                                    {resolution_section(&dispute)}
                                    <EvidenceGallery evidence=vm.evidence />
                                    <CommentsTimeline comments=vm.comments />
                                </div>
                                <div class="detail-grid__side">
                                    {actions_section(vm, &dispute, id.get_value())}
                                </div>
                            </div>
                        }
                        .into_any(),
                        None if vm.loading.get() => {
                            view! { <p class="text-muted">"Loading..."</p> }.into_any()
                        }
                        None => ().into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}

fn field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-field">
            <span class="detail-field__label">{label}</span>
            <span class="detail-field__value">{value}</span>
        </div>
    }
}

fn overview_section(d: &Dispute) -> impl IntoView {
    let priority = d
        .priority
        .map(|p| view! { <StatusBadge variant=p.badge_variant() label=p.label() /> }.into_any())
        .unwrap_or_else(|| view! { <span class="text-muted">"—"</span> }.into_any());

    view! {
        <div class="detail-section">
            <h3 class="detail-section__title">"Overview"</h3>
            <div class="detail-fields">
                {field("ID", d.id.clone())}
                {field("Type", d.dispute_type.label().to_string())}
                <div class="detail-field">
                    <span class="detail-field__label">"Priority"</span>
                    <span class="detail-field__value">{priority}</span>
                </div>
                {field("Created", format_timestamp(&d.created_at))}
                {field("Updated", format_timestamp(&d.updated_at))}
            </div>
            <h4>"Description"</h4>
            <p class="detail-text">{d.description.clone()}</p>
            {d.admin_notes.clone().filter(|n| !n.trim().is_empty()).map(|notes| view! {
                <h4>"Admin notes"</h4>
                <p class="detail-text detail-text--notes">{notes}</p>
            })}
        </div>
    }
}

fn parties_section(d: &Dispute) -> impl IntoView {
    let reporter_email = d
        .reporter
        .as_ref()
        .and_then(|r| r.email.clone())
        .unwrap_or_default();
    let reported = format!("{} ({})", d.reported.display_name(), d.reported.kind_label());

    view! {
        <div class="detail-section">
            <h3 class="detail-section__title">{icon("users")}" Parties"</h3>
            <div class="detail-fields">
                {field("Reporter", d.reporter_name())}
                {(!reporter_email.is_empty()).then(|| field("Reporter email", reporter_email))}
                {field("Reported", reported)}
            </div>
            {d.match_ref.clone().map(|m| view! {
                <h4>"Match"</h4>
                <div class="detail-fields">
                    {field("Date", format_date(&m.date))}
                    {field("Venue", m.venue_name)}
                    {field("Match ID", m.id)}
                </div>
            })}
        </div>
    }
}

fn resolution_section(d: &Dispute) -> Option<impl IntoView> {
    if !d.shows_resolution() {
        return None;
    }
    let outcome = d
        .resolution_outcome
        .map(|o| o.label().to_string())
        .unwrap_or_default();
    let resolver = d
        .resolver
        .as_ref()
        .map(|r| r.display_name())
        .or_else(|| d.resolved_by.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(view! {
        <div class="detail-section detail-section--resolution">
            <h3 class="detail-section__title">{icon("check-circle")}" Resolution"</h3>
            <div class="detail-fields">
                {field("Outcome", outcome)}
                {field("Resolved by", resolver)}
                {field("Resolved at", format_timestamp_opt(d.resolved_at.as_ref()))}
            </div>
            <p class="detail-text">{d.resolution.clone().unwrap_or_default()}</p>
        </div>
    })
}

fn actions_section(vm: DisputeDetailsViewModel, d: &Dispute, id: String) -> AnyView {
    if d.status.available_actions().is_empty() {
        let text = format!("No actions available for {} disputes", d.status.label().to_lowercase());
        return view! {
            <div class="detail-section detail-section--actions">
                <h3 class="detail-section__title">"Actions"</h3>
                <p class="text-muted">{text}</p>
            </div>
        }
        .into_any();
    }
    view! { <ResolutionForm vm=vm dispute_id=id /> }.into_any()
}
