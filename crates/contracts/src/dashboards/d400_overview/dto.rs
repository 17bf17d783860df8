use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Денежные суммы бэкенд отдаёт строками (`"1250.50"`), иногда числами.
pub fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
        Null(()),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) if s.trim().is_empty() => Ok(0.0),
        NumOrStr::Str(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        NumOrStr::Null(()) => Ok(0.0),
    }
}

pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let whole = (cents / 100).abs();
    let frac = (cents % 100).abs();

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// `GET /api/admin/dashboard/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub new_users_7d: u64,
    #[serde(default)]
    pub new_users_30d: u64,
    #[serde(default)]
    pub active_teams: u64,
    #[serde(default)]
    pub total_venues: u64,
    #[serde(default)]
    pub verified_venues: u64,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub confirmed_bookings: u64,
    #[serde(default)]
    pub cancelled_bookings: u64,
    #[serde(default)]
    pub pending_disputes: u64,
    #[serde(default)]
    pub completed_matches: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub revenue_today: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub revenue_week: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub revenue_month: f64,
}

/// Пара «подпись: значение» для столбчатой диаграммы
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

impl ChartBar {
    pub fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Высота столбца в процентах от максимального
pub fn bar_height_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

impl DashboardStats {
    pub fn bookings_bars(&self) -> Vec<ChartBar> {
        let other = self
            .total_bookings
            .saturating_sub(self.confirmed_bookings + self.cancelled_bookings);
        vec![
            ChartBar::new("Confirmed", self.confirmed_bookings as f64),
            ChartBar::new("Cancelled", self.cancelled_bookings as f64),
            ChartBar::new("Other", other as f64),
        ]
    }

    pub fn revenue_bars(&self) -> Vec<ChartBar> {
        vec![
            ChartBar::new("Today", self.revenue_today),
            ChartBar::new("Week", self.revenue_week),
            ChartBar::new("Month", self.revenue_month),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    User,
    Team,
    Booking,
    Dispute,
    Venue,
    #[serde(other)]
    Other,
}

impl ActivityKind {
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Team => "users",
            Self::Booking => "calendar",
            Self::Dispute => "alert-triangle",
            Self::Venue => "map-pin",
            Self::Other => "activity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityUser {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Элемент ленты `GET /api/admin/dashboard/activity?limit=N`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub action: String,
    pub entity_id: String,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_data: Option<ActivityUser>,
}

pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accept_string_amounts() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total_users":20,"total_bookings":10,"confirmed_bookings":6,"cancelled_bookings":1,
                "revenue_today":"150.00","revenue_week":2000,"revenue_month":null}"#,
        )
        .unwrap();
        assert_eq!(stats.revenue_today, 150.0);
        assert_eq!(stats.revenue_week, 2000.0);
        assert_eq!(stats.revenue_month, 0.0);
        assert_eq!(stats.bookings_bars()[2].value, 3.0);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(-12.5), "-$12.50");
    }

    #[test]
    fn test_bar_height() {
        assert_eq!(bar_height_percent(5.0, 10.0), 50.0);
        assert_eq!(bar_height_percent(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_activity_item() {
        let item: ActivityItem = serde_json::from_str(
            r#"{"type":"dispute","action":"created","entity_id":"d1","description":"New dispute",
                "timestamp":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(item.kind, ActivityKind::Dispute);
        assert_eq!(item.kind.icon_name(), "alert-triangle");
    }
}
