//! Running totals across the timeline.

use crate::period::{period_analytics, PeriodAnalytics};
use plan_core::FinancialItem;
use rust_decimal::Decimal;
use serde::Serialize;

/// A period's own figures next to the running totals up to and including it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeAnalytics {
    pub period_revenue: Decimal,
    pub period_cost: Decimal,
    pub period_net: Decimal,
    pub cumulative_revenue: Decimal,
    pub cumulative_cost: Decimal,
    /// Cash position assuming a zero starting balance.
    pub carry_forward: Decimal,
}

impl CumulativeAnalytics {
    fn advance(&self, period: PeriodAnalytics) -> Self {
        let cumulative_revenue = self.cumulative_revenue.saturating_add(period.revenue);
        let cumulative_cost = self.cumulative_cost.saturating_add(period.cost);
        CumulativeAnalytics {
            period_revenue: period.revenue,
            period_cost: period.cost,
            period_net: period.net,
            cumulative_revenue,
            cumulative_cost,
            carry_forward: cumulative_revenue.saturating_sub(cumulative_cost),
        }
    }
}

/// Figures for `period_index` with totals accumulated from period 0.
///
/// Independent of any other call; use [`timeline_series`] to chart a whole
/// timeline in one pass.
pub fn cumulative_analytics(
    items: &[FinancialItem],
    period_index: u32,
    timeline_length: u32,
) -> CumulativeAnalytics {
    (0..=period_index).fold(CumulativeAnalytics::default(), |acc, i| {
        acc.advance(period_analytics(items, i, timeline_length))
    })
}

/// Cumulative figures for every period `0..timeline_length`, computed as a
/// single running scan. Entry `i` equals `cumulative_analytics(items, i, n)`.
pub fn timeline_series(items: &[FinancialItem], timeline_length: u32) -> Vec<CumulativeAnalytics> {
    let mut out = Vec::with_capacity(timeline_length as usize);
    let mut acc = CumulativeAnalytics::default();
    for i in 0..timeline_length {
        acc = acc.advance(period_analytics(items, i, timeline_length));
        out.push(acc);
    }
    out
}
