use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{MatchRef, PersonRef, TeamRef};

// ============================================================================
// Enums
// ============================================================================

/// Статус спора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    Pending,
    UnderReview,
    /// Бэкенд иногда присылает старое имя `awaiting_info`.
    #[serde(alias = "awaiting_info")]
    InfoRequested,
    Resolved,
    Closed,
    Escalated,
    /// Статус, которого клиент ещё не знает: показывается, но без действий.
    #[serde(other)]
    Unknown,
}

impl DisputeStatus {
    pub const ALL: [DisputeStatus; 6] = [
        Self::Pending,
        Self::UnderReview,
        Self::InfoRequested,
        Self::Resolved,
        Self::Closed,
        Self::Escalated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::InfoRequested => "info_requested",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Escalated => "escalated",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "under_review" => Some(Self::UnderReview),
            "info_requested" | "awaiting_info" => Some(Self::InfoRequested),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            "escalated" => Some(Self::Escalated),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::UnderReview => "Under Review",
            Self::InfoRequested => "Info Requested",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
            Self::Escalated => "Escalated",
            Self::Unknown => "Unknown",
        }
    }

    /// Вариант бейджа: warning / primary / success / neutral / error
    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Pending | Self::InfoRequested => "warning",
            Self::UnderReview => "primary",
            Self::Resolved => "success",
            Self::Closed | Self::Unknown => "neutral",
            Self::Escalated => "error",
        }
    }

    /// Resolved and closed disputes are listed on the "resolved" tab.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeType {
    NoShow,
    PaymentIssue,
    VenueIssue,
    Behavior,
    Cancellation,
    /// Сюда же попадают типы, появившиеся на бэкенде позже клиента.
    #[serde(other)]
    Other,
}

impl DisputeType {
    pub const ALL: [DisputeType; 6] = [
        Self::NoShow,
        Self::PaymentIssue,
        Self::VenueIssue,
        Self::Behavior,
        Self::Cancellation,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoShow => "no_show",
            Self::PaymentIssue => "payment_issue",
            Self::VenueIssue => "venue_issue",
            Self::Behavior => "behavior",
            Self::Cancellation => "cancellation",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoShow => "No Show",
            Self::PaymentIssue => "Payment Issue",
            Self::VenueIssue => "Venue Issue",
            Self::Behavior => "Behavior",
            Self::Cancellation => "Cancellation",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl DisputePriority {
    pub const ALL: [DisputePriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Low => "neutral",
            Self::Medium => "primary",
            Self::High => "warning",
            Self::Urgent => "error",
        }
    }
}

impl Default for DisputePriority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOutcome {
    FavorReporter,
    FavorReported,
    NoAction,
    BothWarned,
    Other,
}

impl ResolutionOutcome {
    pub const ALL: [ResolutionOutcome; 5] = [
        Self::FavorReporter,
        Self::FavorReported,
        Self::NoAction,
        Self::BothWarned,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FavorReporter => "favor_reporter",
            Self::FavorReported => "favor_reported",
            Self::NoAction => "no_action",
            Self::BothWarned => "both_warned",
            Self::Other => "other",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FavorReporter => "In favor of reporter",
            Self::FavorReported => "In favor of reported party",
            Self::NoAction => "No action taken",
            Self::BothWarned => "Both parties warned",
            Self::Other => "Other",
        }
    }
}

impl Default for ResolutionOutcome {
    fn default() -> Self {
        Self::FavorReporter
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Сторона, на которую подана жалоба
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedParty {
    User(PersonRef),
    Team(TeamRef),
    None,
}

impl ReportedParty {
    pub fn display_name(&self) -> String {
        match self {
            Self::User(u) => u.display_name(),
            Self::Team(t) => t.display_name(),
            Self::None => "N/A".to_string(),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::User(_) => "User",
            Self::Team(_) => "Team",
            Self::None => "",
        }
    }
}

/// Спор (жалоба) между участниками платформы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DisputeRecord", into = "DisputeRecord")]
pub struct Dispute {
    pub id: String,
    pub dispute_type: DisputeType,
    pub status: DisputeStatus,
    pub priority: Option<DisputePriority>,
    pub description: String,
    pub admin_notes: Option<String>,
    pub resolution: Option<String>,
    pub resolution_outcome: Option<ResolutionOutcome>,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub reporter: Option<PersonRef>,
    pub reported: ReportedParty,
    pub match_ref: Option<MatchRef>,
    pub resolver: Option<PersonRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionViolation {
    /// Resolution fields are set on a dispute that is not resolved.
    ResolutionOnUnresolved(DisputeStatus),
    /// A resolved dispute lacks its outcome or timestamp.
    IncompleteResolution,
}

impl Dispute {
    /// Поля решения имеют смысл только при статусе `resolved`.
    pub fn check_resolution_invariant(&self) -> Result<(), ResolutionViolation> {
        let has_any = self.resolution_outcome.is_some()
            || self.resolved_at.is_some()
            || self.resolved_by.is_some();
        match self.status {
            DisputeStatus::Resolved => {
                if self.resolution_outcome.is_none() || self.resolved_at.is_none() {
                    Err(ResolutionViolation::IncompleteResolution)
                } else {
                    Ok(())
                }
            }
            other if has_any => Err(ResolutionViolation::ResolutionOnUnresolved(other)),
            _ => Ok(()),
        }
    }

    pub fn shows_resolution(&self) -> bool {
        self.status == DisputeStatus::Resolved
    }

    pub fn reporter_name(&self) -> String {
        self.reporter
            .as_ref()
            .map(PersonRef::display_name)
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

/// Плоская форма записи, как её отдаёт API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DisputeRecord {
    id: String,
    #[serde(default)]
    match_id: Option<String>,
    #[serde(default)]
    reporter_id: Option<String>,
    #[serde(default)]
    reported_user_id: Option<String>,
    #[serde(default)]
    reported_team_id: Option<String>,
    #[serde(alias = "type")]
    dispute_type: DisputeType,
    status: DisputeStatus,
    #[serde(default)]
    priority: Option<DisputePriority>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    admin_notes: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
    #[serde(default)]
    resolution_outcome: Option<ResolutionOutcome>,
    #[serde(default)]
    resolved_by: Option<String>,
    #[serde(default)]
    resolved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    reporter: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reported_user: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reported_team: Option<TeamRef>,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    match_ref: Option<MatchRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolver: Option<PersonRef>,
}

impl From<DisputeRecord> for Dispute {
    fn from(r: DisputeRecord) -> Self {
        // Встроенный объект приоритетнее голого id
        let reported = match (r.reported_user, r.reported_team, r.reported_user_id, r.reported_team_id) {
            (Some(user), _, _, _) => ReportedParty::User(user),
            (None, Some(team), _, _) => ReportedParty::Team(team),
            (None, None, Some(id), _) => ReportedParty::User(PersonRef {
                id,
                ..Default::default()
            }),
            (None, None, None, Some(id)) => ReportedParty::Team(TeamRef {
                id,
                ..Default::default()
            }),
            (None, None, None, None) => ReportedParty::None,
        };

        let reporter = r.reporter.or_else(|| {
            r.reporter_id.map(|id| PersonRef {
                id,
                ..Default::default()
            })
        });

        let match_ref = r.match_ref.or_else(|| {
            r.match_id.map(|id| MatchRef {
                id,
                ..Default::default()
            })
        });

        Self {
            id: r.id,
            dispute_type: r.dispute_type,
            status: r.status,
            priority: r.priority,
            description: r.description,
            admin_notes: r.admin_notes,
            resolution: r.resolution,
            resolution_outcome: r.resolution_outcome,
            resolved_by: r.resolved_by,
            resolved_at: r.resolved_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
            reporter,
            reported,
            match_ref,
            resolver: r.resolver,
        }
    }
}

impl From<Dispute> for DisputeRecord {
    fn from(d: Dispute) -> Self {
        let (reported_user, reported_team) = match d.reported {
            ReportedParty::User(u) => (Some(u), None),
            ReportedParty::Team(t) => (None, Some(t)),
            ReportedParty::None => (None, None),
        };
        Self {
            id: d.id,
            match_id: d.match_ref.as_ref().map(|m| m.id.clone()),
            reporter_id: d.reporter.as_ref().map(|p| p.id.clone()),
            reported_user_id: reported_user.as_ref().map(|u| u.id.clone()),
            reported_team_id: reported_team.as_ref().map(|t| t.id.clone()),
            dispute_type: d.dispute_type,
            status: d.status,
            priority: d.priority,
            description: d.description,
            admin_notes: d.admin_notes,
            resolution: d.resolution,
            resolution_outcome: d.resolution_outcome,
            resolved_by: d.resolved_by,
            resolved_at: d.resolved_at,
            created_at: d.created_at,
            updated_at: d.updated_at,
            reporter: d.reporter,
            reported_user,
            reported_team,
            match_ref: d.match_ref,
            resolver: d.resolver,
        }
    }
}

// ============================================================================
// Evidence and comments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceKind {
    Image,
    Video,
    Document,
}

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "webm", "mov", "avi", "mkv"];

/// Вложение к спору (только чтение)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeEvidence {
    pub id: String,
    pub dispute_id: String,
    pub file_url: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub uploader: Option<PersonRef>,
}

impl DisputeEvidence {
    /// MIME-тип из `file_type`, иначе расширение файла в URL
    pub fn kind(&self) -> EvidenceKind {
        if let Some(ft) = self.file_type.as_deref().map(str::to_ascii_lowercase) {
            if ft.starts_with("image/") || ft == "image" {
                return EvidenceKind::Image;
            }
            if ft.starts_with("video/") || ft == "video" {
                return EvidenceKind::Video;
            }
        }

        let path = self.file_url.split(['?', '#']).next().unwrap_or_default();
        let ext = path
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .unwrap_or_default();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            EvidenceKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            EvidenceKind::Video
        } else {
            EvidenceKind::Document
        }
    }

    pub fn file_name(&self) -> &str {
        let path = self.file_url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/').next().unwrap_or(path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeComment {
    pub id: String,
    pub dispute_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub comment: String,
    #[serde(default)]
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub user: Option<PersonRef>,
}

impl DisputeComment {
    pub fn author(&self) -> String {
        self.display_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.user.as_ref().map(PersonRef::display_name))
            .unwrap_or_else(|| "System".to_string())
    }

    pub fn is_from_admin(&self) -> bool {
        self.user
            .as_ref()
            .and_then(|u| u.is_admin)
            .unwrap_or(false)
    }
}

// ============================================================================
// API responses
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DisputesListResponse {
    #[serde(default)]
    pub disputes: Vec<Dispute>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisputeDetailResponse {
    pub dispute: Dispute,
    #[serde(default)]
    pub evidence: Vec<DisputeEvidence>,
    #[serde(default)]
    pub comments: Vec<DisputeComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvidenceResponse {
    #[serde(default)]
    pub evidence: Vec<DisputeEvidence>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<DisputeComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisputeActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub dispute: Option<Dispute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityCounts {
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub urgent: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisputeStats {
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub under_review: u64,
    #[serde(default)]
    pub info_requested: u64,
    #[serde(default)]
    pub resolved: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub by_priority: PriorityCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(status: &str) -> String {
        format!(
            r#"{{
                "id": "d-0001-abcdef",
                "match_id": "m1",
                "reporter_id": "u1",
                "reported_user_id": null,
                "reported_team_id": "t7",
                "dispute_type": "no_show",
                "status": "{status}",
                "priority": null,
                "description": "Team did not show up",
                "admin_notes": null,
                "resolution": null,
                "resolved_by": null,
                "resolved_at": null,
                "created_at": "2024-03-01T10:00:00Z",
                "updated_at": "2024-03-01T10:00:00Z",
                "reporter": {{"id": "u1", "nombre": "Carlos", "email": "c@x.com"}},
                "reported_team": {{"id": "t7", "name": "Los Pumas"}},
                "match": {{"id": "m1", "date": "2024-02-28", "venue_name": "Cancha 5"}}
            }}"#
        )
    }

    #[test]
    fn test_deserialize_reported_team() {
        let d: Dispute = serde_json::from_str(&sample_json("pending")).unwrap();
        assert_eq!(d.status, DisputeStatus::Pending);
        assert_eq!(
            d.reported,
            ReportedParty::Team(TeamRef {
                id: "t7".into(),
                name: Some("Los Pumas".into()),
                nombre: None
            })
        );
        assert_eq!(d.reported.display_name(), "Los Pumas");
        assert_eq!(d.reporter_name(), "Carlos");
        assert_eq!(d.match_ref.as_ref().map(|m| m.venue_name.as_str()), Some("Cancha 5"));
        assert_eq!(d.short_id(), "d-0001-a");
    }

    #[test]
    fn test_awaiting_info_alias() {
        let d: Dispute = serde_json::from_str(&sample_json("awaiting_info")).unwrap();
        assert_eq!(d.status, DisputeStatus::InfoRequested);
        let back = serde_json::to_value(&d).unwrap();
        assert_eq!(back["status"], "info_requested");
        assert_eq!(back["reported_team_id"], "t7");
    }

    #[test]
    fn test_unrecognized_status_and_type() {
        let body = format!(
            r#"{{"disputes": [{}], "total": 1}}"#,
            sample_json("reopened").replace("no_show", "harassment")
        );
        let list: DisputesListResponse = serde_json::from_str(&body).unwrap();
        let d = &list.disputes[0];
        assert_eq!(d.status, DisputeStatus::Unknown);
        assert_eq!(d.dispute_type, DisputeType::Other);
        assert!(d.status.available_actions().is_empty());
        assert!(!d.status.is_final());
        assert_eq!(d.status.label(), "Unknown");
        assert!(!DisputeStatus::ALL.contains(&DisputeStatus::Unknown));
    }

    #[test]
    fn test_resolution_invariant() {
        let mut d: Dispute = serde_json::from_str(&sample_json("pending")).unwrap();
        assert!(d.check_resolution_invariant().is_ok());

        d.resolution_outcome = Some(ResolutionOutcome::NoAction);
        assert_eq!(
            d.check_resolution_invariant(),
            Err(ResolutionViolation::ResolutionOnUnresolved(DisputeStatus::Pending))
        );

        d.status = DisputeStatus::Resolved;
        assert_eq!(
            d.check_resolution_invariant(),
            Err(ResolutionViolation::IncompleteResolution)
        );
        d.resolved_at = Some(d.updated_at);
        assert!(d.check_resolution_invariant().is_ok());
        assert!(d.shows_resolution());
    }

    #[test]
    fn test_evidence_kind() {
        let mut ev = DisputeEvidence {
            id: "e1".into(),
            dispute_id: "d1".into(),
            file_url: "https://cdn.example.com/files/photo.JPG?sig=1".into(),
            file_type: None,
            uploaded_by: None,
            uploaded_at: None,
            uploader: None,
        };
        assert_eq!(ev.kind(), EvidenceKind::Image);
        assert_eq!(ev.file_name(), "photo.JPG");

        ev.file_url = "https://cdn.example.com/files/clip".into();
        ev.file_type = Some("video/mp4".into());
        assert_eq!(ev.kind(), EvidenceKind::Video);

        ev.file_type = Some("application/pdf".into());
        ev.file_url = "https://cdn.example.com/files/receipt.pdf".into();
        assert_eq!(ev.kind(), EvidenceKind::Document);
    }

    #[test]
    fn test_comment_author() {
        let c: DisputeComment = serde_json::from_str(
            r#"{"id":"c1","dispute_id":"d1","user_id":"a1","comment":"Please send photos",
                "is_internal":false,"created_at":"2024-03-02T09:00:00Z",
                "user":{"id":"a1","nombre":"Admin","email":"a@x.com","is_admin":true}}"#,
        )
        .unwrap();
        assert_eq!(c.author(), "Admin");
        assert!(c.is_from_admin());
    }
}
