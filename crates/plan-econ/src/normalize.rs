//! Frequency normalization to a per-period (monthly) equivalent.

use plan_core::{FinancialItem, Frequency};
use rust_decimal::Decimal;
use tracing::trace;

const MONTHS_PER_YEAR: u32 = 12;

/// Per-period equivalent of an item's nominal value.
///
/// One-time amounts are spread evenly over the whole timeline. A zero
/// `timeline_length` is treated as a single period.
///
/// Example:
/// // yearly 120000 => 10000 per month
/// assert_eq!(normalized_monthly_value(&grant, 12), Decimal::new(10_000, 0));
pub fn normalized_monthly_value(item: &FinancialItem, timeline_length: u32) -> Decimal {
    match item.frequency {
        Frequency::Monthly | Frequency::Unknown => item.value,
        Frequency::Yearly => item.value / Decimal::from(MONTHS_PER_YEAR),
        Frequency::OneTime => {
            if timeline_length == 0 {
                trace!(item = %item.id.0, "zero timeline length clamped to 1");
            }
            item.value / Decimal::from(timeline_length.max(1))
        }
    }
}
