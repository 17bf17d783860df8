//! Модерация пользователей, команд и площадок: suspend / activate / verify / delete.
//!
//! Страница держит [`ModerationForm`] в сигнале модального окна; кнопка
//! подтверждения вызывает [`ModerationForm::validate`] и отправляет
//! полученный [`ModerationRequest`] только при успешной проверке.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModerationAction {
    Suspend,
    Activate,
    Verify,
    /// Только для пользователей: `DELETE /api/admin/users/:id`.
    Delete,
}

impl ModerationAction {
    /// Сегмент пути для PATCH-эндпоинтов. Для `Delete` пути нет, используется метод DELETE.
    pub fn path_segment(&self) -> Option<&'static str> {
        match self {
            Self::Suspend => Some("suspend"),
            Self::Activate => Some("activate"),
            Self::Verify => Some("verify"),
            Self::Delete => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Suspend => "Suspend",
            Self::Activate => "Activate",
            Self::Verify => "Verify",
            Self::Delete => "Delete",
        }
    }

    pub fn requires_reason(&self) -> bool {
        matches!(self, Self::Suspend | Self::Delete)
    }

    /// Activate and Verify accept an optional free-text note.
    pub fn accepts_notes(&self) -> bool {
        matches!(self, Self::Activate | Self::Verify)
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Suspend | Self::Delete)
    }

    pub fn success_message(&self, entity: &str) -> String {
        let verb = match self {
            Self::Suspend => "suspended",
            Self::Activate => "activated",
            Self::Verify => "verified",
            Self::Delete => "deleted",
        };
        format!("{} {} successfully", entity, verb)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    #[error("Please provide a reason for {0}")]
    ReasonRequired(&'static str),

    #[error("Duration must be at least 1 day")]
    InvalidDuration,
}

/// Тела запросов модерации.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModerationRequest {
    Suspend {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_days: Option<u32>,
    },
    Activate {
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    Verify {
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    Delete {
        reason: String,
    },
}

impl ModerationRequest {
    pub fn action(&self) -> ModerationAction {
        match self {
            Self::Suspend { .. } => ModerationAction::Suspend,
            Self::Activate { .. } => ModerationAction::Activate,
            Self::Verify { .. } => ModerationAction::Verify,
            Self::Delete { .. } => ModerationAction::Delete,
        }
    }
}

/// Состояние формы в модальном окне модерации.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationForm {
    pub action: ModerationAction,
    pub reason: String,
    pub notes: String,
    pub duration_days: Option<u32>,
}

impl ModerationForm {
    pub fn new(action: ModerationAction) -> Self {
        Self {
            action,
            reason: String::new(),
            notes: String::new(),
            duration_days: None,
        }
    }

    pub fn validate(&self) -> Result<ModerationRequest, ModerationError> {
        let reason = self.reason.trim();
        let notes = Some(self.notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        match self.action {
            ModerationAction::Suspend => {
                if reason.is_empty() {
                    return Err(ModerationError::ReasonRequired("suspension"));
                }
                if self.duration_days == Some(0) {
                    return Err(ModerationError::InvalidDuration);
                }
                Ok(ModerationRequest::Suspend {
                    reason: reason.to_string(),
                    duration_days: self.duration_days,
                })
            }
            ModerationAction::Delete => {
                if reason.is_empty() {
                    return Err(ModerationError::ReasonRequired("deletion"));
                }
                Ok(ModerationRequest::Delete {
                    reason: reason.to_string(),
                })
            }
            ModerationAction::Activate => Ok(ModerationRequest::Activate { notes }),
            ModerationAction::Verify => Ok(ModerationRequest::Verify { notes }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_suspend_requires_reason() {
        let mut form = ModerationForm::new(ModerationAction::Suspend);
        form.reason = "   ".into();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please provide a reason for suspension");

        form.reason = " spam ".into();
        let body = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(body, json!({"reason": "spam"}));
    }

    #[test]
    fn test_suspend_with_duration() {
        let mut form = ModerationForm::new(ModerationAction::Suspend);
        form.reason = "abuse".into();
        form.duration_days = Some(7);
        let body = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(body, json!({"reason": "abuse", "duration_days": 7}));

        form.duration_days = Some(0);
        assert_eq!(form.validate(), Err(ModerationError::InvalidDuration));
    }

    #[test]
    fn test_verify_notes_optional() {
        let form = ModerationForm::new(ModerationAction::Verify);
        let body = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(body, json!({}));

        let mut form = ModerationForm::new(ModerationAction::Verify);
        form.notes = "checked documents".into();
        let body = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(body, json!({"notes": "checked documents"}));
    }

    #[test]
    fn test_activate_needs_no_input() {
        let form = ModerationForm::new(ModerationAction::Activate);
        let req = form.validate().unwrap();
        assert_eq!(req.action(), ModerationAction::Activate);
        assert_eq!(ModerationAction::Activate.path_segment(), Some("activate"));
    }

    #[test]
    fn test_delete_requires_reason() {
        let form = ModerationForm::new(ModerationAction::Delete);
        assert_eq!(
            form.validate(),
            Err(ModerationError::ReasonRequired("deletion"))
        );
        assert!(ModerationAction::Delete.path_segment().is_none());
    }
}
