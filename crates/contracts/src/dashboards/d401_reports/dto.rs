use serde::{Deserialize, Serialize};

use crate::dashboards::d400_overview::de_amount;
use crate::domain::a003_team::TeamReportRow;
use crate::shared::export::Exportable;

/// Вкладки страницы отчётов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTab {
    Overview,
    Bookings,
    Revenue,
    Disputes,
    Users,
    Venues,
    Teams,
}

impl ReportTab {
    pub const ALL: [ReportTab; 7] = [
        Self::Overview,
        Self::Bookings,
        Self::Revenue,
        Self::Disputes,
        Self::Users,
        Self::Venues,
        Self::Teams,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Bookings => "bookings",
            Self::Revenue => "revenue",
            Self::Disputes => "disputes",
            Self::Users => "users",
            Self::Venues => "venues",
            Self::Teams => "teams",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Bookings => "Bookings",
            Self::Revenue => "Revenue",
            Self::Disputes => "Disputes",
            Self::Users => "Users",
            Self::Venues => "Venues",
            Self::Teams => "Teams",
        }
    }

    /// Заголовок печатного документа
    pub fn export_title(&self) -> String {
        format!("{} Report", self.label())
    }

    /// Имя файла без расширения
    pub fn export_file_name(&self) -> String {
        format!("{}-report", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewReport {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub new_users_30d: u64,
    #[serde(default)]
    pub total_teams: u64,
    #[serde(default)]
    pub total_venues: u64,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub pending_disputes: u64,
    #[serde(default)]
    pub completed_matches: u64,
}

impl Exportable for OverviewReport {
    fn headers() -> Vec<&'static str> {
        vec![
            "total_users",
            "new_users_30d",
            "total_teams",
            "total_venues",
            "total_bookings",
            "pending_disputes",
            "completed_matches",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.total_users.to_string(),
            self.new_users_30d.to_string(),
            self.total_teams.to_string(),
            self.total_venues.to_string(),
            self.total_bookings.to_string(),
            self.pending_disputes.to_string(),
            self.completed_matches.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingsReport {
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub confirmed_bookings: u64,
    #[serde(default)]
    pub cancelled_bookings: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_revenue: f64,
}

impl Exportable for BookingsReport {
    fn headers() -> Vec<&'static str> {
        vec![
            "total_bookings",
            "confirmed_bookings",
            "cancelled_bookings",
            "total_revenue",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.total_bookings.to_string(),
            self.confirmed_bookings.to_string(),
            self.cancelled_bookings.to_string(),
            format!("{:.2}", self.total_revenue),
        ]
    }
}

/// Строка помесячной выручки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRow {
    pub month: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub revenue: f64,
    #[serde(default)]
    pub booking_count: u64,
}

impl RevenueRow {
    /// `2024-03-01T00:00:00Z` → `2024-03`
    pub fn month_label(&self) -> &str {
        self.month.get(..7).unwrap_or(&self.month)
    }
}

impl Exportable for RevenueRow {
    fn headers() -> Vec<&'static str> {
        vec!["month", "revenue", "booking_count"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.month_label().to_string(),
            format!("{:.2}", self.revenue),
            self.booking_count.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisputesReport {
    #[serde(default)]
    pub total_disputes: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub under_review: u64,
    #[serde(default)]
    pub resolved: u64,
    #[serde(default)]
    pub no_show_disputes: u64,
    #[serde(default)]
    pub payment_disputes: u64,
}

impl Exportable for DisputesReport {
    fn headers() -> Vec<&'static str> {
        vec![
            "total_disputes",
            "pending",
            "under_review",
            "resolved",
            "no_show_disputes",
            "payment_disputes",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.total_disputes.to_string(),
            self.pending.to_string(),
            self.under_review.to_string(),
            self.resolved.to_string(),
            self.no_show_disputes.to_string(),
            self.payment_disputes.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersReport {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub suspended_users: u64,
    #[serde(default)]
    pub verified_users: u64,
    #[serde(default)]
    pub new_users_7d: u64,
    #[serde(default)]
    pub new_users_30d: u64,
}

impl Exportable for UsersReport {
    fn headers() -> Vec<&'static str> {
        vec![
            "total_users",
            "suspended_users",
            "verified_users",
            "new_users_7d",
            "new_users_30d",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.total_users.to_string(),
            self.suspended_users.to_string(),
            self.verified_users.to_string(),
            self.new_users_7d.to_string(),
            self.new_users_30d.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenuesReport {
    #[serde(default)]
    pub total_venues: u64,
    #[serde(default)]
    pub verified_venues: u64,
    #[serde(default)]
    pub suspended_venues: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub avg_rating: f64,
}

impl Exportable for VenuesReport {
    fn headers() -> Vec<&'static str> {
        vec![
            "total_venues",
            "verified_venues",
            "suspended_venues",
            "avg_rating",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.total_venues.to_string(),
            self.verified_venues.to_string(),
            self.suspended_venues.to_string(),
            format!("{:.2}", self.avg_rating),
        ]
    }
}

/// `GET /api/admin/reports/teams`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamsReport {
    #[serde(default)]
    pub total_teams: u64,
    #[serde(default)]
    pub new_teams_7d: u64,
    #[serde(default)]
    pub new_teams_30d: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub avg_members_per_team: f64,
    #[serde(default)]
    pub teams_with_7_plus: u64,
    #[serde(default)]
    pub teams_with_11_plus: u64,
}

impl Exportable for TeamsReport {
    fn headers() -> Vec<&'static str> {
        vec![
            "total_teams",
            "new_teams_7d",
            "new_teams_30d",
            "avg_members_per_team",
            "teams_with_7_plus",
            "teams_with_11_plus",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.total_teams.to_string(),
            self.new_teams_7d.to_string(),
            self.new_teams_30d.to_string(),
            format!("{:.1}", self.avg_members_per_team),
            self.teams_with_7_plus.to_string(),
            self.teams_with_11_plus.to_string(),
        ]
    }
}

impl Exportable for TeamReportRow {
    fn headers() -> Vec<&'static str> {
        vec!["id", "nombre", "zona", "nivel", "member_count", "capitan_nombre", "capitan_email"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.nombre.clone(),
            self.zona.clone(),
            self.nivel.clone().unwrap_or_default(),
            self.member_count.to_string(),
            self.capitan_nombre.clone().unwrap_or_default(),
            self.capitan_email.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::ExportTable;

    #[test]
    fn test_overview_single_row_export() {
        let report: OverviewReport = serde_json::from_str(
            r#"{"total_users":20,"new_users_30d":2,"total_teams":5,"total_venues":3,
                "total_bookings":20,"pending_disputes":0,"completed_matches":12}"#,
        )
        .unwrap();
        let csv = ExportTable::single(&report).to_csv();
        assert_eq!(
            csv,
            "total_users,new_users_30d,total_teams,total_venues,total_bookings,pending_disputes,completed_matches\n20,2,5,3,20,0,12"
        );
    }

    #[test]
    fn test_teams_summary_string_average() {
        let report: TeamsReport = serde_json::from_str(
            r#"{"total_teams":5,"new_teams_7d":0,"new_teams_30d":0,"avg_members_per_team":"5.0",
                "teams_with_7_plus":1,"teams_with_11_plus":0}"#,
        )
        .unwrap();
        assert_eq!(report.avg_members_per_team, 5.0);
        assert_eq!(report.to_row()[3], "5.0");
    }

    #[test]
    fn test_revenue_rows() {
        let rows: Vec<RevenueRow> = serde_json::from_str(
            r#"[{"month":"2024-03-01T00:00:00.000Z","revenue":"1200.5","booking_count":14}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].to_row(), vec!["2024-03", "1200.50", "14"]);
        assert!(ExportTable::from_rows::<RevenueRow>(&[]).is_err());
    }

    #[test]
    fn test_tab_export_names() {
        assert_eq!(ReportTab::Bookings.export_file_name(), "bookings-report");
        assert_eq!(ReportTab::Teams.export_title(), "Teams Report");
    }
}
