//! Month-granular timeline helpers: calendar periods derived from an anchor
//! date, and conversions between dates and 1-based period indices.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How month-periods are grouped for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One period per month.
    #[default]
    Monthly,
    /// Three consecutive month-periods per entry.
    Quarterly,
}

impl Granularity {
    /// Month-periods covered by one entry.
    pub fn months(self) -> u32 {
        match self {
            Granularity::Monthly => 1,
            Granularity::Quarterly => 3,
        }
    }
}

/// A contiguous calendar range covering one or more 0-based month indices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    /// Stable identifier, `p{n}` for months and `q{n}` for quarters.
    pub id: String,
    /// Display label, e.g. "Mar 2025" or "Q2 2025".
    pub label: String,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered (inclusive).
    pub end_date: NaiveDate,
    /// First 0-based month index covered.
    pub first_index: u32,
    /// Last 0-based month index covered (inclusive).
    pub last_index: u32,
}

impl TimePeriod {
    pub fn contains_index(&self, index: u32) -> bool {
        (self.first_index..=self.last_index).contains(&index)
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift a date by whole months, pinned to the first of the resulting month.
pub fn add_months(start: NaiveDate, months: u32) -> NaiveDate {
    let mut y = start.year();
    let mut m = start.month() as i32 + months as i32;
    y += (m - 1) / 12;
    m = (m - 1) % 12 + 1;
    let m_u = u32::try_from(m).unwrap_or(1);
    NaiveDate::from_ymd_opt(y, m_u, 1).unwrap_or(start)
}

/// Whole months from `anchor`'s month to `date`'s month; negative when
/// `date` is earlier.
pub fn months_between(anchor: NaiveDate, date: NaiveDate) -> i64 {
    let years = i64::from(date.year()) - i64::from(anchor.year());
    years * 12 + i64::from(date.month()) - i64::from(anchor.month())
}

/// 1-based period index of `date` on a timeline starting at `anchor`.
/// Dates before the anchor map to period 1.
pub fn period_index_for_date(anchor: NaiveDate, date: NaiveDate) -> u32 {
    let offset = months_between(anchor, date).max(0);
    u32::try_from(offset + 1).unwrap_or(u32::MAX)
}

/// Generate display periods for `timeline_length` month-periods.
///
/// Monthly yields one entry per index. Quarterly yields `ceil(len / 3)`
/// entries; the final one may cover fewer than three months.
pub fn generate_periods(
    anchor: NaiveDate,
    timeline_length: u32,
    granularity: Granularity,
) -> Vec<TimePeriod> {
    let anchor = month_start(anchor);
    let step = granularity.months();
    let count = timeline_length.div_ceil(step);
    let mut out = Vec::with_capacity(count as usize);
    for n in 0..count {
        let first_index = n * step;
        let last_index = (first_index + step - 1).min(timeline_length - 1);
        let start_date = add_months(anchor, first_index);
        let end_date = add_months(anchor, last_index + 1)
            .pred_opt()
            .unwrap_or(start_date);
        let (id, label) = match granularity {
            Granularity::Monthly => (format!("p{n}"), start_date.format("%b %Y").to_string()),
            Granularity::Quarterly => (
                format!("q{n}"),
                format!("Q{} {}", start_date.month0() / 3 + 1, start_date.year()),
            ),
        };
        out.push(TimePeriod {
            id,
            label,
            start_date,
            end_date,
            first_index,
            last_index,
        });
    }
    out
}
