// Contract tests for the revenue report endpoint: query parameters, the
// response shape, and the zero-data case serializing as empty collections.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use facture::modules::reports::controllers::report_controller::RevenueReportQuery;
use facture::modules::reports::models::{
    ClientRevenue, MonthlyRevenue, RevenueReport, RevenueReportResponse, StatusBreakdown,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_report() -> RevenueReport {
    RevenueReport {
        start_date: date(2025, 1, 1),
        end_date: date(2025, 6, 30),
        by_status: vec![
            StatusBreakdown {
                status: "paid".to_string(),
                invoice_count: 3,
                revenue: dec!(48662),
            },
            StatusBreakdown {
                status: "pending".to_string(),
                invoice_count: 4,
                revenue: dec!(40353.13),
            },
            StatusBreakdown {
                status: "overdue".to_string(),
                invoice_count: 2,
                revenue: dec!(14012.63),
            },
        ],
        top_clients: vec![
            ClientRevenue {
                client_id: "client-1".to_string(),
                name: "Global Enterprises".to_string(),
                revenue: dec!(6181.25),
            },
            ClientRevenue {
                client_id: "client-2".to_string(),
                name: "Restaurant Chain".to_string(),
                revenue: dec!(4563.38),
            },
        ],
        monthly: vec![
            MonthlyRevenue {
                month: "2025-01".to_string(),
                revenue: dec!(9000),
            },
            MonthlyRevenue {
                month: "2025-02".to_string(),
                revenue: dec!(12500.75),
            },
        ],
    }
}

#[test]
fn test_query_parses_iso_dates() {
    let query: RevenueReportQuery = serde_json::from_value(json!({
        "start_date": "2025-01-01",
        "end_date": "2025-06-30"
    }))
    .unwrap();

    assert_eq!(query.start_date, date(2025, 1, 1));
    assert_eq!(query.end_date, date(2025, 6, 30));
}

#[test]
fn test_query_rejects_malformed_dates() {
    let result: Result<RevenueReportQuery, _> = serde_json::from_value(json!({
        "start_date": "01/01/2025",
        "end_date": "2025-06-30"
    }));

    assert!(result.is_err());
}

#[test]
fn test_report_response_shape() {
    let response = RevenueReportResponse::from(&sample_report());
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["start_date"], "2025-01-01");
    assert_eq!(body["end_date"], "2025-06-30");
    assert_eq!(body["total_revenue"], "48662.00");
    assert_eq!(body["pending_revenue"], "40353.13");
    assert_eq!(body["overdue_revenue"], "14012.63");
    assert_eq!(body["invoice_count"], 9);

    let breakdown = body["status_breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 3);
    assert_eq!(breakdown[0]["status"], "paid");
    assert_eq!(breakdown[0]["invoice_count"], 3);
    assert!(breakdown[0]["percent"].is_u64());

    let clients = body["top_clients"].as_array().unwrap();
    assert_eq!(clients[0]["name"], "Global Enterprises");
    assert_eq!(clients[0]["revenue"], "6181.25");

    let monthly = body["monthly_revenue"].as_array().unwrap();
    assert_eq!(monthly[0]["month"], "2025-01");
    assert_eq!(monthly[1]["revenue"], "12500.75");
}

#[test]
fn test_status_shares_sum_near_hundred() {
    let response = RevenueReportResponse::from(&sample_report());

    let total: u64 = response
        .status_breakdown
        .iter()
        .map(|s| u64::from(s.percent))
        .sum();

    // Whole-percent rounding can land a point either side of 100
    assert!((99..=101).contains(&total), "shares summed to {}", total);
}

#[test]
fn test_zero_invoices_serialize_as_zeroes_and_empty_arrays() {
    let report = RevenueReport {
        start_date: date(2025, 1, 1),
        end_date: date(2025, 1, 31),
        by_status: vec![],
        top_clients: vec![],
        monthly: vec![],
    };

    let body = serde_json::to_value(RevenueReportResponse::from(&report)).unwrap();

    assert_eq!(body["total_revenue"], "0.00");
    assert_eq!(body["pending_revenue"], "0.00");
    assert_eq!(body["overdue_revenue"], "0.00");
    assert_eq!(body["invoice_count"], 0);

    // Empty collections stay arrays, never null
    assert!(body["status_breakdown"].as_array().unwrap().is_empty());
    assert!(body["top_clients"].as_array().unwrap().is_empty());
    assert!(body["monthly_revenue"].as_array().unwrap().is_empty());
}
