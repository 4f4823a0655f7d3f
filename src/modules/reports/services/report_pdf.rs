use crate::core::pdf::{PdfPage, MARGIN_MM};
use crate::core::{money, Result};
use crate::modules::reports::models::RevenueReport;

const X_VALUE: f32 = 120.0;
const ROW_STEP: f32 = 7.0;
const BOTTOM_MM: f32 = 20.0;

/// Render the revenue report as a two-column key-value table, one row per
/// dashboard figure.
pub fn render_revenue_report(report: &RevenueReport) -> Result<Vec<u8>> {
    let page = PdfPage::a4("Revenue Report")?;
    let mut y: f32 = 280.0;

    page.bold("Revenue Report", 20.0, MARGIN_MM, y);
    y -= 8.0;
    page.text(
        &format!("Period: {} to {}", report.start_date, report.end_date),
        10.0,
        MARGIN_MM,
        y,
    );

    y -= 8.0;
    page.rule(y);
    y -= 8.0;

    page.bold("Report", 11.0, MARGIN_MM, y);
    page.bold("Value", 11.0, X_VALUE, y);
    y -= 3.5;
    page.rule(y);
    y -= ROW_STEP;

    let mut rows: Vec<(String, String)> = vec![
        (
            "Total Revenue".to_string(),
            money::format_currency(report.total_revenue()),
        ),
        (
            "Pending Revenue".to_string(),
            money::format_currency(report.pending_revenue()),
        ),
        (
            "Overdue Revenue".to_string(),
            money::format_currency(report.overdue_revenue()),
        ),
    ];

    for share in report.status_shares() {
        rows.push((
            format!("Invoice Status - {}", capitalize(&share.status)),
            format!("{}%", share.percent),
        ));
    }

    for client in &report.top_clients {
        rows.push((
            format!("Top Client - {}", client.name),
            money::format_currency(client.revenue),
        ));
    }

    for bucket in &report.monthly {
        rows.push((
            format!("Monthly Revenue - {}", bucket.month),
            money::format_currency(bucket.revenue),
        ));
    }

    if report.invoice_count() == 0 {
        rows.push((
            "Invoices".to_string(),
            "No data available".to_string(),
        ));
    }

    for (label, value) in rows {
        if y < BOTTOM_MM {
            break;
        }
        page.text(&label, 10.0, MARGIN_MM, y);
        page.text(&value, 10.0, X_VALUE, y);
        y -= ROW_STEP;
    }

    page.save()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
