use crate::shared::components::modal::Modal;
use crate::shared::date_utils::format_timestamp_opt;
use crate::shared::icons::icon;
use contracts::domain::a001_dispute::{DisputeEvidence, EvidenceKind};
use leptos::prelude::*;

/// Вложения спора: изображения превью с увеличением, видео плеером, прочее ссылкой
#[component]
pub fn EvidenceGallery(#[prop(into)] evidence: Signal<Vec<DisputeEvidence>>) -> impl IntoView {
    let preview = RwSignal::new(None::<(String, String)>);

    view! {
        <div class="detail-section">
            <h3 class="detail-section__title">
                {icon("file")}
                {move || format!(" Evidence ({})", evidence.with(Vec::len))}
            </h3>
            {move || {
                let items = evidence.get();
                if items.is_empty() {
                    return view! { <p class="text-muted">"No evidence uploaded"</p> }.into_any();
                }
                view! {
                    <div class="evidence-grid">
                        {items.into_iter().map(|item| evidence_card(item, preview)).collect_view()}
                    </div>
                }
                .into_any()
            }}
            {move || preview.get().map(|(url, name)| view! {
                <Modal title=name on_close=Callback::new(move |_| preview.set(None)) wide=true>
                    <img class="evidence-preview" src=url alt="Evidence preview" />
                </Modal>
            })}
        </div>
    }
}

fn evidence_card(item: DisputeEvidence, preview: RwSignal<Option<(String, String)>>) -> AnyView {
    let name = item.file_name().to_string();
    let uploaded = format_timestamp_opt(item.uploaded_at.as_ref());
    let uploader = item
        .uploader
        .as_ref()
        .map(|u| u.display_name())
        .unwrap_or_else(|| "Unknown".to_string());
    let url = item.file_url.clone();

    let media = match item.kind() {
        EvidenceKind::Image => {
            let (full_url, title) = (url.clone(), name.clone());
            view! {
                <img
                    class="evidence-card__thumb"
                    src=url
                    alt=name.clone()
                    on:click=move |_| preview.set(Some((full_url.clone(), title.clone())))
                />
            }
            .into_any()
        }
        EvidenceKind::Video => view! {
            <video class="evidence-card__video" src=url controls=true preload="metadata"></video>
        }
        .into_any(),
        EvidenceKind::Document => view! {
            <a class="evidence-card__doc" href=url target="_blank" rel="noopener noreferrer">
                {icon("file-text")}
                <span>{name.clone()}</span>
            </a>
        }
        .into_any(),
    };

    view! {
        <div class="evidence-card">
            {media}
            <div class="evidence-card__meta">
                <span class="evidence-card__name" title=name.clone()>{name.clone()}</span>
                <span class="text-muted">{format!("{} · {}", uploader, uploaded)}</span>
            </div>
        </div>
    }
    .into_any()
}
