use crate::domain::a001_dispute::api;
use crate::shared::notify::{use_notifier, Notifier};
use crate::shared::query_cache::{use_query_client, QueryClient};
use contracts::domain::a001_dispute::{
    ActionForm, Dispute, DisputeAction, DisputeActionFlow, DisputeComment, DisputeEvidence,
    FlowStep,
};
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel карточки спора: данные, загрузка и форма действия
#[derive(Clone, Copy)]
pub struct DisputeDetailsViewModel {
    pub dispute: RwSignal<Option<Dispute>>,
    pub evidence: RwSignal<Vec<DisputeEvidence>>,
    pub comments: RwSignal<Vec<DisputeComment>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    /// `None`, пока администратор не выбрал действие
    pub flow: RwSignal<Option<DisputeActionFlow>>,
    notifier: Notifier,
    client: QueryClient,
}

impl DisputeDetailsViewModel {
    pub fn new() -> Self {
        Self {
            dispute: RwSignal::new(None),
            evidence: RwSignal::new(Vec::new()),
            comments: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            flow: RwSignal::new(None),
            notifier: use_notifier(),
            client: use_query_client(),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.client.epoch_for(&api::disputes_root())
    }

    /// Карточка, затем вложения и комментарии отдельными запросами
    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            let key = api::detail_key(&id);
            match this.client.fetch(key.clone(), api::fetch_dispute(&id)).await {
                Some(Ok(detail)) => {
                    if let Err(v) = detail.dispute.check_resolution_invariant() {
                        log::warn!("Dispute {} has inconsistent resolution fields: {:?}", id, v);
                    }
                    this.dispute.set(Some(detail.dispute));
                    this.evidence.set(detail.evidence);
                    this.comments.set(detail.comments);
                    this.error.set(None);
                }
                Some(Err(e)) => {
                    log::error!("Failed to load dispute {}: {}", id, e);
                    this.error.set(Some(e));
                }
                None => {}
            }
            this.loading.set(false);

            if this.dispute.with_untracked(Option::is_none) {
                return;
            }

            // Отдельные эндпоинты отдают полные списки; ошибка здесь не фатальна
            let evidence_key = key.child("evidence");
            if let Some(result) = this.client.fetch(evidence_key, api::fetch_evidence(&id)).await {
                match result {
                    Ok(items) => this.evidence.set(items),
                    Err(e) => log::warn!("Failed to load evidence for {}: {}", id, e),
                }
            }
            let comments_key = key.child("comments");
            if let Some(result) = this.client.fetch(comments_key, api::fetch_comments(&id)).await {
                match result {
                    Ok(items) => this.comments.set(items),
                    Err(e) => log::warn!("Failed to load comments for {}: {}", id, e),
                }
            }
        });
    }

    pub fn available_actions(&self) -> Vec<DisputeAction> {
        self.dispute
            .with(|d| d.as_ref().map(|d| d.status.available_actions()))
            .unwrap_or_default()
    }

    /// Выбор вкладки действия; повторный выбор той же вкладки форму не сбрасывает
    pub fn select_action(&self, action: DisputeAction) {
        let Some(status) = self.dispute.with_untracked(|d| d.as_ref().map(|d| d.status)) else {
            return;
        };
        let mut flow = self.flow.get_untracked();
        let result = match flow.as_mut() {
            Some(f) => f.switch_action(action),
            None => DisputeActionFlow::new(status, action).map(|f| {
                flow = Some(f);
            }),
        };
        match result {
            Ok(()) => self.flow.set(flow),
            Err(e) => log::warn!("Cannot select {}: {}", action.label(), e),
        }
    }

    pub fn selected_action(&self) -> Option<DisputeAction> {
        self.flow.with(|f| f.as_ref().map(DisputeActionFlow::action))
    }

    pub fn edit(&self, f: impl FnOnce(&mut ActionForm)) {
        self.flow.update(|flow| {
            if let Some(form) = flow.as_mut().and_then(DisputeActionFlow::form_mut) {
                f(form);
            }
        });
    }

    pub fn can_submit(&self) -> bool {
        self.flow
            .with(|f| f.as_ref().map(DisputeActionFlow::can_submit))
            .unwrap_or(false)
    }

    pub fn is_confirming(&self) -> bool {
        self.flow.with(|f| {
            matches!(
                f.as_ref().map(DisputeActionFlow::step),
                Some(FlowStep::Confirming(_))
            )
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.flow
            .with(|f| f.as_ref().map(DisputeActionFlow::is_submitting))
            .unwrap_or(false)
    }

    pub fn error_message(&self) -> Option<String> {
        self.flow
            .with(|f| f.as_ref().and_then(|f| f.error_message().map(str::to_string)))
    }

    /// Первая фаза: проверка формы и окно подтверждения
    pub fn request_confirmation(&self) {
        self.flow.update(|flow| {
            if let Some(flow) = flow.as_mut() {
                if let Err(e) = flow.request_confirmation() {
                    log::debug!("Confirmation refused: {}", e);
                }
            }
        });
    }

    pub fn cancel_confirmation(&self) {
        self.flow.update(|flow| {
            if let Some(flow) = flow.as_mut() {
                flow.cancel_confirmation();
            }
        });
    }

    /// Вторая фаза: отправка подтверждённого запроса.
    ///
    /// Статус спора локально не меняется; после успеха все ключи `disputes`
    /// инвалидируются и карточка перечитывается с сервера.
    pub fn confirm_and_submit(&self, id: String) {
        let mut request = None;
        self.flow.update(|flow| {
            if let Some(flow) = flow.as_mut() {
                request = flow.confirm().ok();
            }
        });
        let Some(request) = request else {
            return;
        };

        let this = *self;
        let action = request.action();
        spawn_local(async move {
            match api::submit_action(&id, &request).await {
                Ok(resp) => {
                    log::info!("Dispute {} {}: {}", id, action.as_str(), resp.message);
                    this.flow.update(|f| {
                        if let Some(f) = f.as_mut() {
                            f.succeeded();
                        }
                    });
                    this.notifier.success(action.success_message());
                    this.flow.set(None);
                    this.client.invalidate(&api::disputes_root());
                }
                Err(e) => {
                    log::warn!("Dispute {} {} failed: {}", id, action.as_str(), e);
                    this.flow.update(|f| {
                        if let Some(f) = f.as_mut() {
                            f.failed(e.to_string());
                        }
                    });
                }
            }
        });
    }

    pub fn close_action(&self) {
        if !self.is_submitting() {
            self.flow.set(None);
        }
    }
}

impl Default for DisputeDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
