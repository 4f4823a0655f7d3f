use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::{AppError, Result};
use crate::modules::documents::models::{LineItem, LineItemRequest, Totals};

/// How often a recurring invoice generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(format!("Invalid frequency: {}", s)),
        }
    }
}

/// A template that spawns invoices on a schedule
#[derive(Debug, Clone)]
pub struct RecurringInvoice {
    pub id: String,
    pub user_id: String,
    pub client_id: String,
    pub name: Option<String>,
    pub frequency: Frequency,
    /// Preferred generation day for monthly schedules (1-31, clamped to
    /// month length)
    pub day_of_month: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Maximum number of invoices to generate
    pub generation_limit: Option<u32>,
    pub payment_terms: String,
    pub auto_send: bool,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
}

impl RecurringInvoice {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        client_id: String,
        name: Option<String>,
        frequency: Frequency,
        day_of_month: Option<u32>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        generation_limit: Option<u32>,
        payment_terms: Option<String>,
        auto_send: bool,
        notes: Option<String>,
        terms: Option<String>,
        items: Vec<LineItem>,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(AppError::validation("At least one item is required."));
        }
        if let Some(day) = day_of_month {
            if !(1..=31).contains(&day) {
                return Err(AppError::validation(
                    "Day of month must be between 1 and 31.",
                ));
            }
        }
        if let Some(end) = end_date {
            if end < start_date {
                return Err(AppError::validation(
                    "End date cannot be before the start date.",
                ));
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            client_id,
            name,
            frequency,
            day_of_month,
            start_date,
            end_date,
            generation_limit,
            payment_terms: payment_terms
                .unwrap_or_else(|| "Due 30 days after generation".to_string()),
            auto_send,
            notes,
            terms,
            created_at: now,
            updated_at: now,
            items,
        })
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.items)
    }

    /// The next date this template would generate an invoice, strictly after
    /// `today`. None once the schedule has run past its end date.
    pub fn next_occurrence(&self, today: NaiveDate) -> Option<NaiveDate> {
        if today < self.start_date {
            return self.within_end(self.start_date);
        }

        let mut step: u32 = 1;
        loop {
            let candidate = match self.frequency {
                Frequency::Weekly => self.start_date + Duration::days(7 * i64::from(step)),
                Frequency::Monthly => self.nth_month(step)?,
                Frequency::Yearly => self.nth_month(step.checked_mul(12)?)?,
            };

            if candidate > today {
                return self.within_end(candidate);
            }

            step = step.checked_add(1)?;
        }
    }

    fn nth_month(&self, months: u32) -> Option<NaiveDate> {
        let base = self.start_date.checked_add_months(Months::new(months))?;

        match self.day_of_month {
            Some(day) => {
                let clamped = day.min(days_in_month(base.year(), base.month()));
                NaiveDate::from_ymd_opt(base.year(), base.month(), clamped)
            }
            None => Some(base),
        }
    }

    fn within_end(&self, candidate: NaiveDate) -> Option<NaiveDate> {
        match self.end_date {
            Some(end) if candidate > end => None,
            _ => Some(candidate),
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecurringInvoiceRequest {
    #[validate(length(min = 1, message = "Client is required."))]
    pub client_id: String,

    pub name: Option<String>,

    pub frequency: Frequency,

    #[validate(range(min = 1, max = 31, message = "Day of month must be between 1 and 31."))]
    pub day_of_month: Option<u32>,

    pub start_date: NaiveDate,

    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 1, message = "Limit must be at least 1."))]
    pub generation_limit: Option<u32>,

    pub payment_terms: Option<String>,

    #[serde(default)]
    pub auto_send: bool,

    #[validate(length(min = 1, message = "At least one item is required."))]
    #[validate(nested)]
    pub items: Vec<LineItemRequest>,

    pub notes: Option<String>,

    pub terms: Option<String>,
}
