use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

/// Производный статус пользователя (в БД хранятся `suspended` и `deleted_at`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
    Deleted,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [Self::Active, Self::Suspended, Self::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Deleted => "deleted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Deleted => "Deleted",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Active => "success",
            Self::Suspended => "error",
            Self::Deleted => "neutral",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub teams_count: u32,
    #[serde(default)]
    pub disputes_filed: u32,
    #[serde(default)]
    pub disputes_against: u32,
}

impl User {
    /// `deleted_at` важнее флага `suspended`
    pub fn status(&self) -> UserStatus {
        user_status(self.deleted_at.is_some(), self.suspended)
    }

    pub fn display_name(&self) -> &str {
        if self.nombre.trim().is_empty() {
            &self.email
        } else {
            &self.nombre
        }
    }
}

pub fn user_status(deleted: bool, suspended: bool) -> UserStatus {
    if deleted {
        UserStatus::Deleted
    } else if suspended {
        UserStatus::Suspended
    } else {
        UserStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTeam {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub zona: String,
    #[serde(default)]
    pub rol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Карточка пользователя: `GET /api/admin/users/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub teams: Vec<UserTeam>,
    #[serde(default)]
    pub recent_activity: Vec<UserActivity>,
}

impl UserDetail {
    pub fn status(&self) -> UserStatus {
        user_status(self.deleted_at.is_some(), self.suspended)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(suspended: bool, deleted: bool) -> User {
        let deleted_at = if deleted { ",\"deleted_at\":\"2024-05-01T00:00:00Z\"" } else { "" };
        serde_json::from_str(&format!(
            r#"{{"id":"u1","email":"ana@x.com","nombre":"","suspended":{suspended},
                "created_at":"2024-01-01T00:00:00Z"{deleted_at}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_status_precedence() {
        assert_eq!(user(false, false).status(), UserStatus::Active);
        assert_eq!(user(true, false).status(), UserStatus::Suspended);
        assert_eq!(user(false, true).status(), UserStatus::Deleted);
        assert_eq!(user(true, true).status(), UserStatus::Deleted);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(user(false, false).display_name(), "ana@x.com");
    }
}
