//! Date-range selection over sales.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sale::Sale;

/// Which timestamp of a sale is compared against the range.
///
/// The sales history lists by last update (falling back to creation); the debts
/// list by creation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceDate {
    #[default]
    UpdatedOrCreated,
    CreatedAt,
}

/// Closed interval `[start, end]`; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Range over whole UTC calendar days: from the first instant of
    /// `start_day` through the last millisecond of `end_day`.
    pub fn from_days(start_day: Option<NaiveDate>, end_day: Option<NaiveDate>) -> Self {
        let start = start_day.map(|day| day.and_time(NaiveTime::MIN).and_utc());
        let end = end_day.map(|day| {
            day.and_hms_milli_opt(23, 59, 59, 999)
                .unwrap_or_else(|| day.and_time(NaiveTime::MIN))
                .and_utc()
        });
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if instant < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if instant > end {
                return false;
            }
        }
        true
    }
}

/// Sales whose reference timestamp lies in `range`, in their original order.
pub fn filter_by_date_range<'a>(
    sales: &'a [Sale],
    range: &DateRange,
    reference: ReferenceDate,
) -> Vec<&'a Sale> {
    sales
        .iter()
        .filter(|sale| range.contains(sale.reference_date(reference)))
        .collect()
}
