//! Per-period aggregation over items active in that period.

use crate::activation::is_active_in_period;
use crate::normalize::normalized_monthly_value;
use plan_core::{EngineConfig, FinancialItem, ItemKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::Add;

/// Revenue, cost and net of one period (or a sum of periods).
///
/// Sums saturate at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAnalytics {
    pub revenue: Decimal,
    pub cost: Decimal,
    pub net: Decimal,
}

impl PeriodAnalytics {
    fn record(&mut self, kind: ItemKind, amount: Decimal) {
        match kind {
            ItemKind::Revenue => self.revenue = self.revenue.saturating_add(amount),
            ItemKind::Cost => self.cost = self.cost.saturating_add(amount),
        }
        self.net = self.revenue.saturating_sub(self.cost);
    }
}

impl Add for PeriodAnalytics {
    type Output = PeriodAnalytics;

    fn add(self, rhs: Self) -> Self {
        let revenue = self.revenue.saturating_add(rhs.revenue);
        let cost = self.cost.saturating_add(rhs.cost);
        PeriodAnalytics {
            revenue,
            cost,
            net: revenue.saturating_sub(cost),
        }
    }
}

/// Revenue and cost of one category within a period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFlow {
    pub category: String,
    pub revenue: Decimal,
    pub cost: Decimal,
}

/// Items contributing to `period_index`, in input order.
fn active_items(
    items: &[FinancialItem],
    period_index: u32,
) -> impl Iterator<Item = &FinancialItem> {
    items
        .iter()
        .filter(move |item| is_active_in_period(item, period_index))
}

/// Sum normalized values of the items active in `period_index` (0-based).
///
/// Example:
/// // revenue 10000/month and cost 15000/month from period 1
/// // => revenue 10000, cost 15000, net -5000 in period 0
pub fn period_analytics(
    items: &[FinancialItem],
    period_index: u32,
    timeline_length: u32,
) -> PeriodAnalytics {
    let mut out = PeriodAnalytics::default();
    for item in active_items(items, period_index) {
        out.record(item.kind, normalized_monthly_value(item, timeline_length));
    }
    out
}

/// Same as [`period_analytics`], partitioned by category.
///
/// Categories appear in the order they are first seen; blank categories are
/// grouped under the configured uncategorized label.
pub fn period_category_analytics(
    items: &[FinancialItem],
    period_index: u32,
    timeline_length: u32,
    config: &EngineConfig,
) -> Vec<CategoryFlow> {
    let mut flows: Vec<CategoryFlow> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for item in active_items(items, period_index) {
        let label = config.category_label(&item.category);
        let slot = *slots.entry(label).or_insert_with(|| {
            flows.push(CategoryFlow {
                category: label.to_string(),
                revenue: Decimal::ZERO,
                cost: Decimal::ZERO,
            });
            flows.len() - 1
        });
        let amount = normalized_monthly_value(item, timeline_length);
        let flow = &mut flows[slot];
        match item.kind {
            ItemKind::Revenue => flow.revenue = flow.revenue.saturating_add(amount),
            ItemKind::Cost => flow.cost = flow.cost.saturating_add(amount),
        }
    }
    flows
}

/// Sum of [`period_analytics`] over the closed index range
/// `first_index..=last_index`, e.g. the months of one quarter.
pub fn range_analytics(
    items: &[FinancialItem],
    first_index: u32,
    last_index: u32,
    timeline_length: u32,
) -> PeriodAnalytics {
    (first_index..=last_index)
        .map(|i| period_analytics(items, i, timeline_length))
        .fold(PeriodAnalytics::default(), Add::add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cost, item, revenue};
    use plan_core::Frequency;
    use proptest::prelude::*;

    fn d(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    #[test]
    fn first_period_of_burning_scenario() {
        let items = vec![
            revenue("sales", 10_000, Frequency::Monthly),
            cost("payroll", 15_000, Frequency::Monthly),
        ];
        let p = period_analytics(&items, 0, 12);
        assert_eq!(p.revenue, d(10_000));
        assert_eq!(p.cost, d(15_000));
        assert_eq!(p.net, d(-5_000));
    }

    #[test]
    fn inactive_items_are_skipped() {
        let items = vec![
            revenue("sales", 10_000, Frequency::Monthly),
            item("hire", ItemKind::Cost, 4_000, Frequency::Monthly, 3).ending_at(4),
        ];
        assert_eq!(period_analytics(&items, 1, 12).cost, Decimal::ZERO);
        assert_eq!(period_analytics(&items, 2, 12).cost, d(4_000));
        assert_eq!(period_analytics(&items, 4, 12).cost, Decimal::ZERO);
    }

    #[test]
    fn huge_values_saturate() {
        let mut a = revenue("a", 0, Frequency::Monthly);
        a.value = Decimal::MAX;
        let b = a.clone();
        let mut c = cost("c", 0, Frequency::Monthly);
        c.value = Decimal::MAX;
        let p = period_analytics(&[a, b, c], 0, 12);
        assert_eq!(p.revenue, Decimal::MAX);
        assert_eq!(p.cost, Decimal::MAX);
        assert_eq!(p.net, Decimal::ZERO);
        let q = range_analytics(&[cost("x", 0, Frequency::Monthly)], 0, 2, 12) + p;
        assert_eq!(q.revenue, Decimal::MAX);
    }

    #[test]
    fn empty_items_yield_zeroes() {
        assert_eq!(period_analytics(&[], 3, 12), PeriodAnalytics::default());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let mut rent = cost("rent", 2_000, Frequency::Monthly);
        rent.category = "Premises".into();
        let mut misc = cost("misc", 50, Frequency::Monthly);
        misc.category = "   ".into();
        let mut refund = revenue("refund", 30, Frequency::Monthly);
        refund.category = String::new();
        let items = vec![
            rent,
            revenue("sales", 9_000, Frequency::Monthly),
            misc,
            cost("ops", 500, Frequency::Monthly),
            refund,
        ];
        let flows = period_category_analytics(&items, 0, 12, &EngineConfig::default());
        let names: Vec<&str> = flows.iter().map(|f| f.category.as_str()).collect();
        assert_eq!(names, vec!["Premises", "Sales", "Uncategorized", "Operations"]);
        assert_eq!(flows[2].cost, d(50));
        assert_eq!(flows[2].revenue, d(30));
        assert_eq!(flows[3].cost, d(500));
    }

    #[test]
    fn quarter_sums_its_months() {
        let items = vec![
            revenue("sales", 1_000, Frequency::Monthly),
            item("fee", ItemKind::Cost, 300, Frequency::Monthly, 2).ending_at(2),
        ];
        let q = range_analytics(&items, 0, 2, 12);
        assert_eq!(q.revenue, d(3_000));
        assert_eq!(q.cost, d(300));
        assert_eq!(q.net, d(2_700));
    }

    proptest! {
        #[test]
        fn category_flows_sum_to_totals(values in proptest::collection::vec((0i64..50_000, any::<bool>(), 1u32..6), 0..20),
                                        p in 0u32..8) {
            let items: Vec<FinancialItem> = values
                .iter()
                .enumerate()
                .map(|(n, &(v, is_rev, start))| {
                    let kind = if is_rev { ItemKind::Revenue } else { ItemKind::Cost };
                    let mut i = item(&format!("i{n}"), kind, v, Frequency::Monthly, start);
                    i.category = format!("c{}", n % 3);
                    i
                })
                .collect();
            let totals = period_analytics(&items, p, 12);
            let flows = period_category_analytics(&items, p, 12, &EngineConfig::default());
            let rev: Decimal = flows.iter().map(|f| f.revenue).sum();
            let cost: Decimal = flows.iter().map(|f| f.cost).sum();
            prop_assert_eq!(rev, totals.revenue);
            prop_assert_eq!(cost, totals.cost);
        }
    }
}
