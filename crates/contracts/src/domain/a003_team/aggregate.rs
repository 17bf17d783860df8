use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Лимит капитанов в команде. Проверяет сервер, клиент только показывает.
pub const MAX_CAPTAINS: usize = 3;

pub const TEAM_ZONES: [&str; 5] = ["Norte", "Sur", "Este", "Oeste", "Centro"];

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamCaptain {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
}

impl TeamCaptain {
    pub fn display_name(&self) -> &str {
        if self.nombre.trim().is_empty() {
            &self.email
        } else {
            &self.nombre
        }
    }
}

/// Команда (список `GET /api/admin/teams`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub zona: String,
    #[serde(default)]
    pub nivel: Option<String>,
    #[serde(default)]
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub capitan: Option<TeamCaptain>,
    #[serde(default)]
    pub members_count: u32,
}

impl Team {
    pub fn display_name(&self) -> String {
        if self.zona.is_empty() {
            self.nombre.clone()
        } else {
            format!("{} ({})", self.nombre, self.zona)
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.suspended {
            "Suspended"
        } else {
            "Active"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberUser {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(alias = "rol")]
    pub role: String,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user: Option<TeamMemberUser>,
}

impl TeamMember {
    pub fn display_name(&self) -> String {
        self.nombre
            .clone()
            .or_else(|| self.user.as_ref().map(|u| u.nombre.clone()))
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.display_email())
            .unwrap_or_else(|| self.user_id.clone())
    }

    pub fn display_email(&self) -> Option<String> {
        self.email
            .clone()
            .or_else(|| self.user.as_ref().map(|u| u.email.clone()))
            .filter(|e| !e.is_empty())
    }

    pub fn is_captain(&self) -> bool {
        MemberRole::parse(&self.role) == Some(MemberRole::Capitan)
    }
}

/// Карточка команды: `GET /api/admin/teams/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDetail {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub zona: String,
    #[serde(default)]
    pub nivel: Option<String>,
    #[serde(default)]
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub capitan: Option<TeamCaptain>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub total: u64,
}

// ============================================================================
// Roster editor (reports/teams)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Member,
    Capitan,
}

impl MemberRole {
    pub const ALL: [MemberRole; 2] = [Self::Member, Self::Capitan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Capitan => "capitan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "member" | "miembro" | "jugador" => Some(Self::Member),
            "capitan" | "captain" => Some(Self::Capitan),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Capitan => "Captain",
        }
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        Self::Member
    }
}

/// Строка `GET /api/admin/reports/teams/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReportRow {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub zona: String,
    #[serde(default)]
    pub nivel: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "members_count")]
    pub member_count: u32,
    #[serde(default)]
    pub capitan_nombre: Option<String>,
    #[serde(default)]
    pub capitan_email: Option<String>,
}

/// `GET /api/admin/reports/teams/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub zona: String,
    #[serde(default)]
    pub nivel: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub capitan_id: Option<String>,
    #[serde(default)]
    pub capitan_nombre: Option<String>,
    #[serde(default)]
    pub capitan_email: Option<String>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl TeamRoster {
    pub fn captain_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_captain()).count()
    }

    /// Подсказка для UI; окончательное решение за сервером
    pub fn captain_slots_left(&self) -> usize {
        MAX_CAPTAINS.saturating_sub(self.captain_count())
    }
}

/// `PATCH /api/admin/reports/teams/:id`; пустые поля не отправляются
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTeamRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zona: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl UpdateTeamRequest {
    /// Только изменённые поля относительно текущего состава
    pub fn diff(current: &TeamRoster, nombre: &str, zona: &str, nivel: &str, descripcion: &str) -> Self {
        fn changed(new: &str, old: Option<&str>) -> Option<String> {
            let new = new.trim();
            (new != old.unwrap_or_default().trim()).then(|| new.to_string())
        }
        Self {
            nombre: changed(nombre, Some(current.nombre.as_str())),
            zona: changed(zona, Some(current.zona.as_str())),
            nivel: changed(nivel, current.nivel.as_deref()),
            descripcion: changed(descripcion, current.descripcion.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.zona.is_none()
            && self.nivel.is_none()
            && self.descripcion.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Please enter a valid user email")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddMemberRequest {
    pub email: String,
    pub role: MemberRole,
}

impl AddMemberRequest {
    pub fn new(email: &str, role: MemberRole) -> Result<Self, RosterError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(RosterError::InvalidEmail);
        }
        Ok(Self {
            email: email.to_string(),
            role,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MembersResponse {
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"{
        "id": "team-1",
        "nombre": "Los Tigres FC",
        "zona": "Norte",
        "nivel": "Avanzado",
        "descripcion": "Equipo competitivo",
        "capitan_id": "u1",
        "members": [
            {"user_id": "u1", "role": "capitan", "nombre": "Juan Pérez", "email": "user1@test.com"},
            {"user_id": "u2", "role": "capitan", "nombre": "Cap Two", "email": "cap2@test.com"},
            {"user_id": "u3", "role": "capitan", "nombre": "Cap Three", "email": "cap3@test.com"},
            {"user_id": "u4", "role": "member", "email": "p4@test.com"}
        ]
    }"#;

    #[test]
    fn test_captain_count() {
        let roster: TeamRoster = serde_json::from_str(ROSTER).unwrap();
        assert_eq!(roster.captain_count(), 3);
        assert_eq!(roster.captain_slots_left(), 0);
        assert_eq!(roster.members[3].display_name(), "p4@test.com");
    }

    #[test]
    fn test_update_diff_only_changed_fields() {
        let roster: TeamRoster = serde_json::from_str(ROSTER).unwrap();
        let req = UpdateTeamRequest::diff(&roster, "Los Tigres FC", "Sur", "Avanzado", "Equipo competitivo");
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({"zona": "Sur"}));

        let unchanged = UpdateTeamRequest::diff(&roster, " Los Tigres FC ", "Norte", "Avanzado", "Equipo competitivo");
        assert!(unchanged.is_empty());
    }

    #[test]
    fn test_add_member_request() {
        let req = AddMemberRequest::new(" newcap@test.com ", MemberRole::Capitan).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"email": "newcap@test.com", "role": "capitan"})
        );
        assert_eq!(
            AddMemberRequest::new("nope", MemberRole::Member),
            Err(RosterError::InvalidEmail)
        );
        let err = AddMemberRequest::new("   ", MemberRole::Member).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid user email");
    }

    #[test]
    fn test_legacy_rol_field() {
        let m: TeamMember = serde_json::from_str(
            r#"{"user_id":"u9","rol":"Capitan","user":{"id":"u9","nombre":"Lia","email":"l@x.com"}}"#,
        )
        .unwrap();
        assert!(m.is_captain());
        assert_eq!(m.display_name(), "Lia");
    }
}
