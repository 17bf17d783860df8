//! Окно модерации (suspend / activate / verify / delete) и его состояние.
//!
//! Страница держит [`ModerationState`], открывает окно для конкретной строки
//! и передаёт в [`ModerationState::submit`] future с запросом к своему API.

use std::future::Future;

use contracts::domain::common::{ModerationAction, ModerationForm, ModerationRequest};
use contracts::shared::api_error::ApiError;
use contracts::shared::query_cache::QueryKey;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::modal::Modal;
use crate::shared::notify::{use_notifier, Notifier};
use crate::shared::query_cache::{use_query_client, QueryClient};

#[derive(Debug, Clone, PartialEq)]
pub struct ModerationTarget {
    pub id: String,
    pub name: String,
    pub action: ModerationAction,
}

#[derive(Clone, Copy)]
pub struct ModerationState {
    pub target: RwSignal<Option<ModerationTarget>>,
    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    notifier: Notifier,
    client: QueryClient,
}

impl ModerationState {
    /// Вызывать при создании компонента: берёт Notifier и QueryClient из контекста
    pub fn new() -> Self {
        Self {
            target: RwSignal::new(None),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            notifier: use_notifier(),
            client: use_query_client(),
        }
    }

    pub fn open(&self, id: &str, name: &str, action: ModerationAction) {
        self.error.set(None);
        self.target.set(Some(ModerationTarget {
            id: id.to_string(),
            name: name.to_string(),
            action,
        }));
    }

    pub fn close(&self) {
        if self.busy.get_untracked() {
            return;
        }
        self.error.set(None);
        self.target.set(None);
    }

    /// Успех: уведомление, сброс кэша под `cache_root`, окно закрывается.
    /// Ошибка: текст сервера в окне, данные не меняются.
    pub fn submit<Fut>(&self, entity: &'static str, cache_root: QueryKey, request: Fut)
    where
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        let Some(target) = self.target.get_untracked() else {
            return;
        };
        self.busy.set(true);
        self.error.set(None);

        let this = *self;
        spawn_local(async move {
            let result = request.await;
            this.busy.set(false);
            match result {
                Ok(()) => {
                    log::info!("{} {} -> {:?}", entity, target.id, target.action);
                    this.notifier.success(target.action.success_message(entity));
                    this.client.invalidate(&cache_root);
                    this.target.set(None);
                }
                Err(e) => {
                    log::warn!("{:?} {} {} failed: {}", target.action, entity, target.id, e);
                    this.error.set(Some(e.to_string()));
                }
            }
        });
    }
}

impl Default for ModerationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Форма модерации в модальном окне.
///
/// `allow_duration` включает поле срока приостановки (только пользователи),
/// `hide_notes` убирает поле заметок там, где эндпоинт тело не принимает.
#[component]
pub fn ModerationDialog(
    /// "User", "Team", "Venue"
    entity: &'static str,
    target: ModerationTarget,
    #[prop(optional)] allow_duration: bool,
    #[prop(optional)] hide_notes: bool,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] server_error: Signal<Option<String>>,
    on_submit: Callback<ModerationRequest>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let action = target.action;
    let form = RwSignal::new(ModerationForm::new(action));
    let local_error = RwSignal::new(None::<String>);

    let reason = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let duration = RwSignal::new(String::new());

    Effect::new(move |_| {
        let (r, n, d) = (reason.get(), notes.get(), duration.get());
        form.update(|f| {
            f.reason = r;
            f.notes = n;
            f.duration_days = d.trim().parse::<u32>().ok();
        });
    });

    let submit = move || {
        // Непустое, но нечисловое значение срока считаем ошибкой ввода
        let raw_duration = duration.get_untracked();
        if !raw_duration.trim().is_empty() && raw_duration.trim().parse::<u32>().is_err() {
            local_error.set(Some("Duration must be a whole number of days".to_string()));
            return;
        }
        match form.get_untracked().validate() {
            Ok(request) => {
                local_error.set(None);
                on_submit.run(request);
            }
            Err(e) => local_error.set(Some(e.to_string())),
        }
    };

    let title = format!("{} {}", action.title(), entity);
    let prompt = match action {
        ModerationAction::Suspend => format!("Suspend \"{}\"?", target.name),
        ModerationAction::Activate => format!("Reactivate \"{}\"?", target.name),
        ModerationAction::Verify => format!("Mark \"{}\" as verified?", target.name),
        ModerationAction::Delete => {
            format!("Delete \"{}\"? This action cannot be undone.", target.name)
        }
    };
    let confirm_label = action.title();
    let destructive = action.is_destructive();

    view! {
        <Modal title=title on_close=on_cancel>
            <p class="moderation__prompt">{prompt}</p>

            {action.requires_reason().then(|| view! {
                <div class="form__group">
                    <label class="form__label">"Reason *"</label>
                    <Textarea value=reason placeholder="Explain the reason for this action" />
                </div>
            })}

            {(allow_duration && action == ModerationAction::Suspend).then(|| view! {
                <div class="form__group">
                    <label class="form__label">"Duration (days)"</label>
                    <Input value=duration placeholder="Leave empty for indefinite" />
                </div>
            })}

            {(action.accepts_notes() && !hide_notes).then(|| view! {
                <div class="form__group">
                    <label class="form__label">"Notes"</label>
                    <Textarea value=notes placeholder="Optional notes" />
                </div>
            })}

            {move || local_error.get().or_else(|| server_error.get()).map(|e| view! {
                <div class="alert alert--error">{e}</div>
            })}

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                    disabled=busy
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    class=if destructive { "button--danger" } else { "" }
                    on_click=move |_| submit()
                    disabled=busy
                >
                    {move || if busy.get() { "Processing...".to_string() } else { confirm_label.to_string() }}
                </Button>
            </div>
        </Modal>
    }
}
