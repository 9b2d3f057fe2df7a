//! Whether an item contributes value in a given 0-based period.
//!
//! Items carry 1-based `starts_at`/`ends_at`. An end that is missing, zero, or
//! earlier than the start leaves the item open-ended rather than failing.

use plan_core::FinancialItem;
use serde::Serialize;

/// The 1-based end of an item, if it is a usable one.
fn valid_end(item: &FinancialItem) -> Option<u32> {
    item.ends_at.filter(|&end| end > 0 && end >= item.starts_at)
}

/// True when `period_index` (0-based) lies within the item's window.
///
/// Example:
/// // starts_at 3, ends_at 5 => active at indices 2, 3 and 4 only
pub fn is_active_in_period(item: &FinancialItem, period_index: u32) -> bool {
    let item_start = item.starts_at.saturating_sub(1);
    if item_start > period_index {
        return false;
    }
    match valid_end(item) {
        Some(end) => end - 1 >= period_index,
        None => true,
    }
}

/// Resolved closed window of 0-based indices an item is active in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWindow {
    /// First active index.
    pub start: u32,
    /// Last active index, `None` when open-ended.
    pub end: Option<u32>,
}

impl ItemWindow {
    pub fn of(item: &FinancialItem) -> Self {
        Self {
            start: item.starts_at.saturating_sub(1),
            end: valid_end(item).map(|e| e - 1),
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Number of active periods within a timeline of `timeline_length`.
    pub fn active_periods(&self, timeline_length: u32) -> u32 {
        if self.start >= timeline_length {
            return 0;
        }
        let last = self.end.map_or(timeline_length - 1, |e| e.min(timeline_length - 1));
        last - self.start + 1
    }
}
