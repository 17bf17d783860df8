use crate::dashboards::d401_reports::api::ReportData;
use crate::shared::export::{export_to_csv, export_to_pdf};
use contracts::dashboards::d400_overview::format_money;
use contracts::dashboards::d401_reports::{ReportTab, RevenueRow};
use contracts::shared::export::Exportable;
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

/// `new_users_30d` → `New users 30d`
pub fn metric_label(header: &str) -> String {
    let text = header.replace('_', " ");
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn export_rows<T: Exportable>(rows: &[T], tab: ReportTab, format: ExportFormat) {
    match format {
        ExportFormat::Csv => export_to_csv(rows, &tab.export_file_name()),
        ExportFormat::Pdf => export_to_pdf(rows, &tab.export_title(), &tab.export_file_name()),
    }
}

/// Одиночные отчёты выгружаются одной строкой, выручка: по месяцам
pub fn export_report(data: &ReportData, tab: ReportTab, format: ExportFormat) {
    match data {
        ReportData::Overview(r) => export_rows(std::slice::from_ref(r), tab, format),
        ReportData::Bookings(r) => export_rows(std::slice::from_ref(r), tab, format),
        ReportData::Revenue(rows) => export_rows(rows, tab, format),
        ReportData::Disputes(r) => export_rows(std::slice::from_ref(r), tab, format),
        ReportData::Users(r) => export_rows(std::slice::from_ref(r), tab, format),
        ReportData::Venues(r) => export_rows(std::slice::from_ref(r), tab, format),
        ReportData::Teams(r) => export_rows(std::slice::from_ref(r), tab, format),
    }
}

fn metric_grid<T: Exportable>(report: &T) -> AnyView {
    let cells = T::headers().into_iter().zip(report.to_row());
    view! {
        <div class="metric-grid">
            {cells.map(|(header, value)| view! {
                <div class="metric-grid__item">
                    <div class="metric-grid__label">{metric_label(header)}</div>
                    <div class="metric-grid__value">{value}</div>
                </div>
            }).collect_view()}
        </div>
    }
    .into_any()
}

fn revenue_table(rows: Vec<RevenueRow>) -> AnyView {
    if rows.is_empty() {
        return view! { <p class="text-muted">"No revenue recorded yet"</p> }.into_any();
    }
    view! {
        <div class="table-wrapper">
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Month"</TableHeaderCell>
                        <TableHeaderCell>"Revenue"</TableHeaderCell>
                        <TableHeaderCell>"Bookings"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {rows.into_iter().map(|row| {
                        let month = row.month_label().to_string();
                        let revenue = format_money(row.revenue);
                        let booking_count = row.booking_count;
                        view! {
                            <TableRow>
                                <TableCell>{month}</TableCell>
                                <TableCell>{revenue}</TableCell>
                                <TableCell>{booking_count}</TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        </div>
    }
    .into_any()
}

pub fn render_report(data: ReportData) -> AnyView {
    match data {
        ReportData::Overview(r) => metric_grid(&r),
        ReportData::Bookings(r) => metric_grid(&r),
        ReportData::Revenue(rows) => revenue_table(rows),
        ReportData::Disputes(r) => metric_grid(&r),
        ReportData::Users(r) => metric_grid(&r),
        ReportData::Venues(r) => metric_grid(&r),
        ReportData::Teams(r) => metric_grid(&r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_label() {
        assert_eq!(metric_label("new_users_30d"), "New users 30d");
        assert_eq!(metric_label("avg_rating"), "Avg rating");
        assert_eq!(metric_label(""), "");
    }
}
