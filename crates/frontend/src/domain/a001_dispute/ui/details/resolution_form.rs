//! Форма действия по спору: вкладки review / resolve / request info,
//! поля выбранной формы и двухфазное подтверждение.

use super::view_model::DisputeDetailsViewModel;
use crate::shared::components::modal::ConfirmDialog;
use contracts::domain::a001_dispute::{
    ActionForm, DisputeAction, DisputePriority, RequestedFrom, ResolutionOutcome,
};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ResolutionForm(vm: DisputeDetailsViewModel, dispute_id: String) -> impl IntoView {
    let dispute_id = StoredValue::new(dispute_id);

    view! {
        <div class="detail-section detail-section--actions">
            <h3 class="detail-section__title">"Actions"</h3>

            <div class="page-tabs">
                {move || vm.available_actions().into_iter().map(|action| view! {
                    <button
                        class="page-tabs__item"
                        class:page-tabs__item--active=move || vm.selected_action() == Some(action)
                        disabled=move || vm.is_submitting()
                        on:click=move |_| vm.select_action(action)
                    >
                        {action.label()}
                    </button>
                }).collect_view()}
            </div>

            {move || vm.selected_action().map(|action| view! {
                <div class="action-form">
                    {form_fields(vm, action)}

                    {move || vm.error_message().map(|e| view! {
                        <div class="alert alert--error">{e}</div>
                    })}

                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.close_action()
                            disabled=Signal::derive(move || vm.is_submitting())
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.request_confirmation()
                            disabled=Signal::derive(move || !vm.can_submit())
                        >
                            {action.label()}
                        </Button>
                    </Flex>
                </div>
            })}

            <Show when=move || vm.is_confirming() || vm.is_submitting()>
                {move || vm.selected_action().map(|action| view! {
                    <ConfirmDialog
                        title=action.label()
                        message=action.confirmation_text()
                        confirm_label="Confirm"
                        busy=Signal::derive(move || vm.is_submitting())
                        on_confirm=Callback::new(move |_| vm.confirm_and_submit(dispute_id.get_value()))
                        on_cancel=Callback::new(move |_| vm.cancel_confirmation())
                    />
                })}
            </Show>
        </div>
    }
}

/// Поля зависят от варианта формы; значения читаются из flow при каждом рендере
fn form_fields(vm: DisputeDetailsViewModel, action: DisputeAction) -> AnyView {
    let form = move || vm.flow.with(|f| f.as_ref().map(|f| f.form().clone()));

    match action {
        DisputeAction::Review => view! {
            <div class="form__group">
                <label class="form__label">"Admin notes *"</label>
                <textarea
                    class="form__textarea"
                    rows="4"
                    placeholder="Initial assessment of the dispute"
                    prop:value=move || match form() {
                        Some(ActionForm::Review(f)) => f.admin_notes,
                        _ => String::new(),
                    }
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        vm.edit(|f| if let ActionForm::Review(f) = f { f.admin_notes = v });
                    }
                ></textarea>
            </div>
            <div class="form__group">
                <label class="form__label">"Priority"</label>
                <select
                    class="form__select"
                    prop:value=move || match form() {
                        Some(ActionForm::Review(f)) => f.priority.as_str().to_string(),
                        _ => DisputePriority::default().as_str().to_string(),
                    }
                    on:change=move |ev| {
                        if let Some(p) = DisputePriority::from_str_opt(&event_target_value(&ev)) {
                            vm.edit(|f| if let ActionForm::Review(f) = f { f.priority = p });
                        }
                    }
                >
                    {DisputePriority::ALL.iter().map(|p| view! {
                        <option value=p.as_str()>{p.label()}</option>
                    }).collect_view()}
                </select>
            </div>
        }
        .into_any(),

        DisputeAction::Resolve => view! {
            <div class="form__group">
                <label class="form__label">"Outcome"</label>
                <select
                    class="form__select"
                    prop:value=move || match form() {
                        Some(ActionForm::Resolve(f)) => f.resolution_outcome.as_str().to_string(),
                        _ => ResolutionOutcome::default().as_str().to_string(),
                    }
                    on:change=move |ev| {
                        if let Some(o) = ResolutionOutcome::from_str_opt(&event_target_value(&ev)) {
                            vm.edit(|f| if let ActionForm::Resolve(f) = f { f.resolution_outcome = o });
                        }
                    }
                >
                    {ResolutionOutcome::ALL.iter().map(|o| view! {
                        <option value=o.as_str()>{o.label()}</option>
                    }).collect_view()}
                </select>
            </div>
            <div class="form__group">
                <label class="form__label">"Resolution *"</label>
                <textarea
                    class="form__textarea"
                    rows="4"
                    placeholder="Decision visible to both parties"
                    prop:value=move || match form() {
                        Some(ActionForm::Resolve(f)) => f.resolution,
                        _ => String::new(),
                    }
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        vm.edit(|f| if let ActionForm::Resolve(f) = f { f.resolution = v });
                    }
                ></textarea>
            </div>
            <div class="form__group">
                <label class="form__label">"Admin notes"</label>
                <textarea
                    class="form__textarea"
                    rows="3"
                    placeholder="Internal notes (optional)"
                    prop:value=move || match form() {
                        Some(ActionForm::Resolve(f)) => f.admin_notes,
                        _ => String::new(),
                    }
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        vm.edit(|f| if let ActionForm::Resolve(f) = f { f.admin_notes = v });
                    }
                ></textarea>
            </div>
        }
        .into_any(),

        DisputeAction::RequestInfo => view! {
            <div class="form__group">
                <label class="form__label">"Request from"</label>
                <select
                    class="form__select"
                    prop:value=move || match form() {
                        Some(ActionForm::RequestInfo(f)) => f.requested_from.as_str().to_string(),
                        _ => RequestedFrom::default().as_str().to_string(),
                    }
                    on:change=move |ev| {
                        if let Some(r) = RequestedFrom::from_str_opt(&event_target_value(&ev)) {
                            vm.edit(|f| if let ActionForm::RequestInfo(f) = f { f.requested_from = r });
                        }
                    }
                >
                    {RequestedFrom::ALL.iter().map(|r| view! {
                        <option value=r.as_str()>{r.label()}</option>
                    }).collect_view()}
                </select>
            </div>
            <div class="form__group">
                <label class="form__label">"Message *"</label>
                <textarea
                    class="form__textarea"
                    rows="4"
                    placeholder="What information is needed?"
                    prop:value=move || match form() {
                        Some(ActionForm::RequestInfo(f)) => f.message,
                        _ => String::new(),
                    }
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        vm.edit(|f| if let ActionForm::RequestInfo(f) = f { f.message = v });
                    }
                ></textarea>
            </div>
        }
        .into_any(),
    }
}
