use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::PersonRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityType {
    User,
    Team,
    Venue,
    Booking,
    Match,
    Dispute,
    Payment,
    #[serde(other)]
    Other,
}

impl AuditEntityType {
    pub const ALL: [AuditEntityType; 8] = [
        Self::User,
        Self::Team,
        Self::Venue,
        Self::Booking,
        Self::Match,
        Self::Dispute,
        Self::Payment,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Team => "team",
            Self::Venue => "venue",
            Self::Booking => "booking",
            Self::Match => "match",
            Self::Dispute => "dispute",
            Self::Payment => "payment",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Team => "Team",
            Self::Venue => "Venue",
            Self::Booking => "Booking",
            Self::Match => "Match",
            Self::Dispute => "Dispute",
            Self::Payment => "Payment",
            Self::Other => "Other",
        }
    }
}

/// Запись журнала действий администраторов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub admin_id: String,
    #[serde(default)]
    pub admin: Option<PersonRef>,
    pub action: String,
    pub entity_type: AuditEntityType,
    pub entity_id: String,
    #[serde(default)]
    pub old_values: Option<serde_json::Value>,
    #[serde(default)]
    pub new_values: Option<serde_json::Value>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn admin_name(&self) -> String {
        self.admin
            .as_ref()
            .map(PersonRef::display_name)
            .unwrap_or_else(|| self.admin_id.clone())
    }

    /// `suspend_user` → `Suspend User`
    pub fn action_label(&self) -> String {
        self.action
            .split(['_', '-', '.'])
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_changes(&self) -> bool {
        self.old_values.is_some() || self.new_values.is_some()
    }
}

/// Красивый JSON для модального окна; `null` для отсутствующих значений
pub fn pretty_values(values: Option<&serde_json::Value>) -> String {
    values
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_else(|| "null".to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogsResponse {
    #[serde(default)]
    pub logs: Vec<AuditLog>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_log_parsing() {
        let log: AuditLog = serde_json::from_str(
            r#"{"id":"l1","admin_id":"a1","admin":{"id":"a1","nombre":"Root","email":"r@x.com"},
                "action":"suspend_user","entity_type":"user","entity_id":"u1",
                "old_values":{"suspended":false},"new_values":{"suspended":true},
                "reason":"spam","created_at":"2024-04-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(log.entity_type, AuditEntityType::User);
        assert_eq!(log.action_label(), "Suspend User");
        assert_eq!(log.admin_name(), "Root");
        assert!(log.has_changes());
        assert_eq!(
            pretty_values(log.new_values.as_ref()),
            "{\n  \"suspended\": true\n}"
        );
        assert_eq!(pretty_values(None), "null");
    }

    #[test]
    fn test_unknown_entity_type_maps_to_other() {
        let t: AuditEntityType = serde_json::from_str("\"coupon\"").unwrap();
        assert_eq!(t, AuditEntityType::Other);
    }
}
