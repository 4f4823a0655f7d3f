// Recurring-invoice schedule arithmetic: the next generation date for
// weekly, monthly, and yearly templates, including short months and the
// end-of-schedule cutoff.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use facture::documents::models::LineItem;
use facture::modules::recurring::models::{Frequency, RecurringInvoice};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn template(
    frequency: Frequency,
    day_of_month: Option<u32>,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> RecurringInvoice {
    RecurringInvoice::new(
        "user-1".to_string(),
        "client-1".to_string(),
        None,
        frequency,
        day_of_month,
        start,
        end,
        None,
        None,
        false,
        None,
        None,
        vec![LineItem::new("Retainer".to_string(), 1, dec!(1000), None, 0).unwrap()],
    )
    .unwrap()
}

#[test]
fn test_start_date_is_first_occurrence_when_in_future() {
    let tpl = template(Frequency::Monthly, None, date(2025, 9, 1), None);

    assert_eq!(tpl.next_occurrence(date(2025, 8, 5)), Some(date(2025, 9, 1)));
}

#[test]
fn test_weekly_steps_by_seven_days() {
    let tpl = template(Frequency::Weekly, None, date(2025, 1, 6), None);

    assert_eq!(tpl.next_occurrence(date(2025, 1, 6)), Some(date(2025, 1, 13)));
    assert_eq!(tpl.next_occurrence(date(2025, 1, 13)), Some(date(2025, 1, 20)));
    assert_eq!(tpl.next_occurrence(date(2025, 1, 15)), Some(date(2025, 1, 20)));
}

#[test]
fn test_monthly_keeps_start_day() {
    let tpl = template(Frequency::Monthly, None, date(2025, 1, 15), None);

    assert_eq!(tpl.next_occurrence(date(2025, 1, 15)), Some(date(2025, 2, 15)));
    assert_eq!(tpl.next_occurrence(date(2025, 6, 20)), Some(date(2025, 7, 15)));
}

#[test]
fn test_monthly_day_of_month_clamps_to_short_months() {
    let tpl = template(Frequency::Monthly, Some(31), date(2025, 1, 31), None);

    // February has no 31st
    assert_eq!(tpl.next_occurrence(date(2025, 1, 31)), Some(date(2025, 2, 28)));
    // ...and March does again
    assert_eq!(tpl.next_occurrence(date(2025, 2, 28)), Some(date(2025, 3, 31)));
}

#[test]
fn test_monthly_day_of_month_clamps_to_leap_february() {
    let tpl = template(Frequency::Monthly, Some(30), date(2024, 1, 30), None);

    assert_eq!(tpl.next_occurrence(date(2024, 2, 1)), Some(date(2024, 2, 29)));
}

#[test]
fn test_yearly_lands_on_anniversary() {
    let tpl = template(Frequency::Yearly, None, date(2024, 3, 10), None);

    assert_eq!(tpl.next_occurrence(date(2024, 3, 10)), Some(date(2025, 3, 10)));
    assert_eq!(tpl.next_occurrence(date(2025, 3, 10)), Some(date(2026, 3, 10)));
}

#[test]
fn test_schedule_ends_after_end_date() {
    let tpl = template(
        Frequency::Monthly,
        None,
        date(2025, 1, 15),
        Some(date(2025, 3, 1)),
    );

    assert_eq!(tpl.next_occurrence(date(2025, 1, 20)), Some(date(2025, 2, 15)));
    assert_eq!(tpl.next_occurrence(date(2025, 2, 20)), None);
}

#[test]
fn test_start_after_end_never_generates() {
    let result = RecurringInvoice::new(
        "user-1".to_string(),
        "client-1".to_string(),
        None,
        Frequency::Weekly,
        None,
        date(2025, 6, 1),
        Some(date(2025, 5, 1)),
        None,
        None,
        false,
        None,
        None,
        vec![LineItem::new("Retainer".to_string(), 1, dec!(1000), None, 0).unwrap()],
    );

    assert!(result
        .unwrap_err()
        .to_string()
        .contains("End date cannot be before the start date"));
}

#[test]
fn test_template_requires_items() {
    let result = RecurringInvoice::new(
        "user-1".to_string(),
        "client-1".to_string(),
        None,
        Frequency::Monthly,
        None,
        date(2025, 1, 1),
        None,
        None,
        None,
        false,
        None,
        None,
        vec![],
    );

    assert!(result
        .unwrap_err()
        .to_string()
        .contains("At least one item is required"));
}

#[test]
fn test_default_payment_terms_applied() {
    let tpl = template(Frequency::Monthly, None, date(2025, 1, 1), None);

    assert_eq!(tpl.payment_terms, "Due 30 days after generation");
}

#[test]
fn test_totals_computed_from_template_items() {
    let tpl = template(Frequency::Monthly, None, date(2025, 1, 1), None);

    assert_eq!(tpl.totals().grand_total, dec!(1000));
}
