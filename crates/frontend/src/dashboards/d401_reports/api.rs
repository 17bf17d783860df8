//! Отчёты `/api/admin/reports/*`. Каждая вкладка страницы загружается
//! в [`ReportData`] и кэшируется под `reports/<tab>`.

use chrono::NaiveDate;
use contracts::dashboards::d401_reports::{
    BookingsReport, DisputesReport, OverviewReport, ReportTab, RevenueRow, TeamsReport,
    UsersReport, VenuesReport,
};
use contracts::shared::api_error::ApiError;
use contracts::shared::query_cache::QueryKey;

use crate::shared::http;

/// Период отчёта по бронированиям; пустые границы не отправляются
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn validate(&self) -> Result<(), String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => {
                Err("Start date must not be after end date".to_string())
            }
            _ => Ok(()),
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start {
            pairs.push(("start_date".to_string(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end_date".to_string(), end.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    Overview(OverviewReport),
    Bookings(BookingsReport),
    Revenue(Vec<RevenueRow>),
    Disputes(DisputesReport),
    Users(UsersReport),
    Venues(VenuesReport),
    Teams(TeamsReport),
}

pub fn reports_root() -> QueryKey {
    QueryKey::root("reports")
}

/// Диапазон дат входит в ключ только для бронирований
pub fn report_key(tab: ReportTab, range: &DateRange) -> QueryKey {
    let key = reports_root().child(tab.as_str());
    match tab {
        ReportTab::Bookings => key.child(http::with_query("", &range.to_query_pairs())),
        _ => key,
    }
}

pub async fn fetch_report(tab: ReportTab, range: DateRange) -> Result<ReportData, ApiError> {
    let path = format!("/api/admin/reports/{}", tab.as_str());
    let data = match tab {
        ReportTab::Overview => ReportData::Overview(http::get_json(&path).await?),
        ReportTab::Bookings => ReportData::Bookings(
            http::get_json_with_query(&path, &range.to_query_pairs()).await?,
        ),
        // Голый массив по месяцам
        ReportTab::Revenue => ReportData::Revenue(http::get_json(&path).await?),
        ReportTab::Disputes => ReportData::Disputes(http::get_json(&path).await?),
        ReportTab::Users => ReportData::Users(http::get_json(&path).await?),
        ReportTab::Venues => ReportData::Venues(http::get_json(&path).await?),
        ReportTab::Teams => ReportData::Teams(http::get_json(&path).await?),
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_range_query_pairs() {
        let range = DateRange {
            start: Some(date("2024-03-01")),
            end: None,
        };
        assert_eq!(
            range.to_query_pairs(),
            vec![("start_date".to_string(), "2024-03-01".to_string())]
        );
        assert!(DateRange::default().to_query_pairs().is_empty());
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let range = DateRange {
            start: Some(date("2024-03-10")),
            end: Some(date("2024-03-01")),
        };
        assert!(range.validate().is_err());
        let same_day = DateRange {
            start: Some(date("2024-03-01")),
            end: Some(date("2024-03-01")),
        };
        assert!(same_day.validate().is_ok());
    }

    #[test]
    fn test_range_only_keys_bookings() {
        let range = DateRange {
            start: Some(date("2024-03-01")),
            end: Some(date("2024-03-31")),
        };
        assert_eq!(
            report_key(ReportTab::Users, &range),
            report_key(ReportTab::Users, &DateRange::default())
        );
        assert_ne!(
            report_key(ReportTab::Bookings, &range),
            report_key(ReportTab::Bookings, &DateRange::default())
        );
        assert!(report_key(ReportTab::Bookings, &range).starts_with(&reports_root()));
    }
}
