//! Машина состояний разбора споров.
//!
//! ```text
//! pending ──review──▶ under_review ──resolve──▶ resolved
//!    │                    │  ▲
//!    └──request-info──▶ info_requested ──resolve──▶ resolved
//!                             └──review──┘
//! ```
//!
//! Переходы выполняет сервер; клиент только решает, какие действия показать,
//! и собирает валидное тело запроса. Статус локально не меняется.

use serde::Serialize;
use thiserror::Error;

use super::aggregate::{DisputePriority, DisputeStatus, ResolutionOutcome};

// ============================================================================
// Actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisputeAction {
    Review,
    Resolve,
    RequestInfo,
}

impl DisputeAction {
    pub const ALL: [DisputeAction; 3] = [Self::Review, Self::Resolve, Self::RequestInfo];

    /// Последний сегмент пути `POST /api/admin/disputes/:id/<action>`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Resolve => "resolve",
            Self::RequestInfo => "request-info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Review => "Review",
            Self::Resolve => "Resolve",
            Self::RequestInfo => "Request Info",
        }
    }

    pub fn valid_from(&self) -> &'static [DisputeStatus] {
        match self {
            Self::Review => &[DisputeStatus::Pending, DisputeStatus::InfoRequested],
            Self::Resolve => &[DisputeStatus::UnderReview, DisputeStatus::InfoRequested],
            Self::RequestInfo => &[DisputeStatus::Pending, DisputeStatus::UnderReview],
        }
    }

    pub fn is_allowed_from(&self, status: DisputeStatus) -> bool {
        self.valid_from().contains(&status)
    }

    pub fn target_status(&self) -> DisputeStatus {
        match self {
            Self::Review => DisputeStatus::UnderReview,
            Self::Resolve => DisputeStatus::Resolved,
            Self::RequestInfo => DisputeStatus::InfoRequested,
        }
    }

    pub fn confirmation_text(&self) -> &'static str {
        match self {
            Self::Review => "Mark this dispute as under review?",
            Self::Resolve => "Resolve this dispute? This action cannot be undone.",
            Self::RequestInfo => "Send this information request to the selected parties?",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Review => "Dispute reviewed successfully",
            Self::Resolve => "Dispute resolved successfully",
            Self::RequestInfo => "Information request sent successfully",
        }
    }
}

impl DisputeStatus {
    /// Действия, доступные администратору из текущего статуса
    pub fn available_actions(&self) -> Vec<DisputeAction> {
        DisputeAction::ALL
            .into_iter()
            .filter(|a| a.is_allowed_from(*self))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedFrom {
    Reporter,
    Reported,
    Both,
}

impl RequestedFrom {
    pub const ALL: [RequestedFrom; 3] = [Self::Reporter, Self::Reported, Self::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reporter => "reporter",
            Self::Reported => "reported",
            Self::Both => "both",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Reporter => "Reporter",
            Self::Reported => "Reported party",
            Self::Both => "Both parties",
        }
    }
}

impl Default for RequestedFrom {
    fn default() -> Self {
        Self::Reporter
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("{action} is not available for a dispute in status {status}")]
    ActionNotAllowed {
        action: &'static str,
        status: &'static str,
    },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid step: {0}")]
    InvalidStep(&'static str),
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDisputeRequest {
    pub admin_notes: String,
    pub priority: DisputePriority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveDisputeRequest {
    pub resolution: String,
    pub resolution_outcome: ResolutionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestInfoDisputeRequest {
    pub message: String,
    pub requested_from: RequestedFrom,
}

/// Валидированное тело одного из трёх действий
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionRequest {
    Review(ReviewDisputeRequest),
    Resolve(ResolveDisputeRequest),
    RequestInfo(RequestInfoDisputeRequest),
}

impl ActionRequest {
    pub fn action(&self) -> DisputeAction {
        match self {
            Self::Review(_) => DisputeAction::Review,
            Self::Resolve(_) => DisputeAction::Resolve,
            Self::RequestInfo(_) => DisputeAction::RequestInfo,
        }
    }

    pub fn endpoint_path(&self, dispute_id: &str) -> String {
        format!("/api/admin/disputes/{}/{}", dispute_id, self.action().as_str())
    }
}

// ============================================================================
// Forms
// ============================================================================

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    pub admin_notes: String,
    pub priority: DisputePriority,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<ReviewDisputeRequest, WorkflowError> {
        let admin_notes =
            non_empty(&self.admin_notes).ok_or(WorkflowError::MissingField("Admin notes"))?;
        Ok(ReviewDisputeRequest {
            admin_notes,
            priority: self.priority,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveForm {
    pub resolution: String,
    pub resolution_outcome: ResolutionOutcome,
    pub admin_notes: String,
}

impl ResolveForm {
    pub fn validate(&self) -> Result<ResolveDisputeRequest, WorkflowError> {
        let resolution =
            non_empty(&self.resolution).ok_or(WorkflowError::MissingField("Resolution"))?;
        Ok(ResolveDisputeRequest {
            resolution,
            resolution_outcome: self.resolution_outcome,
            admin_notes: non_empty(&self.admin_notes),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInfoForm {
    pub message: String,
    pub requested_from: RequestedFrom,
}

impl RequestInfoForm {
    pub fn validate(&self) -> Result<RequestInfoDisputeRequest, WorkflowError> {
        let message = non_empty(&self.message).ok_or(WorkflowError::MissingField("Message"))?;
        Ok(RequestInfoDisputeRequest {
            message,
            requested_from: self.requested_from,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionForm {
    Review(ReviewForm),
    Resolve(ResolveForm),
    RequestInfo(RequestInfoForm),
}

impl ActionForm {
    /// Пустая форма со значениями по умолчанию (priority medium, outcome favor_reporter,
    /// requested_from reporter)
    pub fn empty(action: DisputeAction) -> Self {
        match action {
            DisputeAction::Review => Self::Review(ReviewForm::default()),
            DisputeAction::Resolve => Self::Resolve(ResolveForm::default()),
            DisputeAction::RequestInfo => Self::RequestInfo(RequestInfoForm::default()),
        }
    }

    pub fn action(&self) -> DisputeAction {
        match self {
            Self::Review(_) => DisputeAction::Review,
            Self::Resolve(_) => DisputeAction::Resolve,
            Self::RequestInfo(_) => DisputeAction::RequestInfo,
        }
    }

    pub fn validate(&self) -> Result<ActionRequest, WorkflowError> {
        match self {
            Self::Review(f) => f.validate().map(ActionRequest::Review),
            Self::Resolve(f) => f.validate().map(ActionRequest::Resolve),
            Self::RequestInfo(f) => f.validate().map(ActionRequest::RequestInfo),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Two-phase confirmation flow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    Editing,
    Confirming(ActionRequest),
    Submitting,
    Done,
    Failed(String),
}

/// Состояние модального окна действия над спором.
///
/// `Editing → Confirming → Submitting → Done | Failed`. Запрос к серверу
/// отправляется только с тем телом, которое вернул [`DisputeActionFlow::confirm`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisputeActionFlow {
    status: DisputeStatus,
    form: ActionForm,
    step: FlowStep,
}

impl DisputeActionFlow {
    pub fn new(status: DisputeStatus, action: DisputeAction) -> Result<Self, WorkflowError> {
        Self::check_allowed(status, action)?;
        Ok(Self {
            status,
            form: ActionForm::empty(action),
            step: FlowStep::Editing,
        })
    }

    fn check_allowed(status: DisputeStatus, action: DisputeAction) -> Result<(), WorkflowError> {
        if action.is_allowed_from(status) {
            Ok(())
        } else {
            Err(WorkflowError::ActionNotAllowed {
                action: action.label(),
                status: status.as_str(),
            })
        }
    }

    pub fn status(&self) -> DisputeStatus {
        self.status
    }

    pub fn action(&self) -> DisputeAction {
        self.form.action()
    }

    pub fn step(&self) -> &FlowStep {
        &self.step
    }

    pub fn form(&self) -> &ActionForm {
        &self.form
    }

    /// Форма редактируется только на шаге `Editing` (и после ошибки)
    pub fn form_mut(&mut self) -> Option<&mut ActionForm> {
        match self.step {
            FlowStep::Editing | FlowStep::Failed(_) => Some(&mut self.form),
            _ => None,
        }
    }

    /// Переключение вкладки сбрасывает форму
    pub fn switch_action(&mut self, action: DisputeAction) -> Result<(), WorkflowError> {
        if self.step == FlowStep::Submitting {
            return Err(WorkflowError::InvalidStep("request in flight"));
        }
        Self::check_allowed(self.status, action)?;
        if action != self.form.action() {
            self.form = ActionForm::empty(action);
        }
        self.step = FlowStep::Editing;
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.step, FlowStep::Editing | FlowStep::Failed(_)) && self.form.is_valid()
    }

    pub fn is_submitting(&self) -> bool {
        self.step == FlowStep::Submitting
    }

    /// Первая фаза: проверить форму и показать подтверждение
    pub fn request_confirmation(&mut self) -> Result<(), WorkflowError> {
        match self.step {
            FlowStep::Editing | FlowStep::Failed(_) => {
                let request = self.form.validate()?;
                self.step = FlowStep::Confirming(request);
                Ok(())
            }
            _ => Err(WorkflowError::InvalidStep("not editing")),
        }
    }

    pub fn cancel_confirmation(&mut self) {
        if matches!(self.step, FlowStep::Confirming(_)) {
            self.step = FlowStep::Editing;
        }
    }

    /// Вторая фаза: отдать тело запроса для отправки
    pub fn confirm(&mut self) -> Result<ActionRequest, WorkflowError> {
        match std::mem::replace(&mut self.step, FlowStep::Submitting) {
            FlowStep::Confirming(request) => Ok(request),
            other => {
                self.step = other;
                Err(WorkflowError::InvalidStep("nothing to confirm"))
            }
        }
    }

    pub fn succeeded(&mut self) {
        if self.step == FlowStep::Submitting {
            self.step = FlowStep::Done;
        }
    }

    /// Сообщение сервера показывается как есть; форма сохраняется
    pub fn failed(&mut self, message: impl Into<String>) {
        if self.step == FlowStep::Submitting {
            self.step = FlowStep::Failed(message.into());
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.step {
            FlowStep::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_available_actions_match_valid_from() {
        use DisputeAction::*;
        use DisputeStatus::*;

        let expected: [(DisputeStatus, Vec<DisputeAction>); 7] = [
            (Pending, vec![Review, RequestInfo]),
            (UnderReview, vec![Resolve, RequestInfo]),
            (InfoRequested, vec![Review, Resolve]),
            (Resolved, vec![]),
            (Closed, vec![]),
            (Escalated, vec![]),
            (Unknown, vec![]),
        ];
        for (status, actions) in expected {
            assert_eq!(status.available_actions(), actions, "status {:?}", status);
        }

        for status in DisputeStatus::ALL {
            for action in status.available_actions() {
                assert!(action.valid_from().contains(&status));
            }
        }
    }

    #[test]
    fn test_target_status() {
        assert_eq!(DisputeAction::Review.target_status(), DisputeStatus::UnderReview);
        assert_eq!(DisputeAction::Resolve.target_status(), DisputeStatus::Resolved);
        assert_eq!(
            DisputeAction::RequestInfo.target_status(),
            DisputeStatus::InfoRequested
        );
    }

    #[test]
    fn test_resolve_without_resolution_yields_no_request() {
        let mut flow = DisputeActionFlow::new(DisputeStatus::UnderReview, DisputeAction::Resolve)
            .unwrap();
        if let Some(ActionForm::Resolve(f)) = flow.form_mut() {
            f.resolution = "   ".into();
            f.admin_notes = "checked".into();
        }
        assert!(!flow.can_submit());
        assert_eq!(
            flow.request_confirmation(),
            Err(WorkflowError::MissingField("Resolution"))
        );
        assert_eq!(flow.step(), &FlowStep::Editing);
        assert!(flow.confirm().is_err());
        assert_eq!(flow.step(), &FlowStep::Editing);
    }

    #[test]
    fn test_request_info_both_body() {
        let form = RequestInfoForm {
            message: "Please upload the receipt".into(),
            requested_from: RequestedFrom::Both,
        };
        let body = serde_json::to_value(ActionRequest::RequestInfo(form.validate().unwrap()))
            .unwrap();
        assert_eq!(
            body,
            json!({"message": "Please upload the receipt", "requested_from": "both"})
        );
    }

    #[test]
    fn test_resolve_omits_empty_admin_notes() {
        let form = ResolveForm {
            resolution: "Refund issued".into(),
            resolution_outcome: ResolutionOutcome::FavorReporter,
            admin_notes: "  ".into(),
        };
        let body = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"resolution": "Refund issued", "resolution_outcome": "favor_reporter"})
        );
    }

    #[test]
    fn test_review_defaults_and_endpoint() {
        let form = ActionForm::empty(DisputeAction::Review);
        assert_eq!(
            form,
            ActionForm::Review(ReviewForm {
                admin_notes: String::new(),
                priority: DisputePriority::Medium
            })
        );
        let req = ActionRequest::Review(ReviewDisputeRequest {
            admin_notes: "n".into(),
            priority: DisputePriority::High,
        });
        assert_eq!(req.endpoint_path("42"), "/api/admin/disputes/42/review");
        let req = ActionRequest::RequestInfo(RequestInfoDisputeRequest {
            message: "m".into(),
            requested_from: RequestedFrom::Reporter,
        });
        assert_eq!(req.endpoint_path("42"), "/api/admin/disputes/42/request-info");
    }

    #[test]
    fn test_flow_full_cycle() {
        let mut flow =
            DisputeActionFlow::new(DisputeStatus::Pending, DisputeAction::Review).unwrap();
        if let Some(ActionForm::Review(f)) = flow.form_mut() {
            f.admin_notes = "Looking into it".into();
            f.priority = DisputePriority::Urgent;
        }
        flow.request_confirmation().unwrap();
        assert!(matches!(flow.step(), FlowStep::Confirming(_)));
        assert!(flow.form_mut().is_none());

        flow.cancel_confirmation();
        assert_eq!(flow.step(), &FlowStep::Editing);

        flow.request_confirmation().unwrap();
        let req = flow.confirm().unwrap();
        assert_eq!(req.action(), DisputeAction::Review);
        assert!(flow.is_submitting());

        flow.failed("Dispute already under review");
        assert_eq!(flow.error_message(), Some("Dispute already under review"));
        assert!(flow.can_submit());

        flow.request_confirmation().unwrap();
        flow.confirm().unwrap();
        flow.succeeded();
        assert_eq!(flow.step(), &FlowStep::Done);
    }

    #[test]
    fn test_flow_rejects_disallowed_action() {
        assert_eq!(
            DisputeActionFlow::new(DisputeStatus::Resolved, DisputeAction::Resolve),
            Err(WorkflowError::ActionNotAllowed {
                action: "Resolve",
                status: "resolved"
            })
        );

        let mut flow =
            DisputeActionFlow::new(DisputeStatus::Pending, DisputeAction::Review).unwrap();
        assert!(flow.switch_action(DisputeAction::Resolve).is_err());
        assert!(flow.switch_action(DisputeAction::RequestInfo).is_ok());
        assert_eq!(flow.action(), DisputeAction::RequestInfo);
    }
}
