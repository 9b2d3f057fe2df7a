#![deny(warnings)]

//! Financial projection and analytics engine for the scenario planner.
//!
//! Every function here is a pure computation over a borrowed item slice:
//! - Frequency normalization to a per-period (monthly) equivalent
//! - Period activation using 1-based item start/end
//! - Per-period and cumulative revenue/cost/net aggregation
//! - Scenario-wide steady-state totals, burn rate, runway and breakdowns
//! - A first-period viability check
//!
//! Two notions of "activity" coexist on purpose. Period and cumulative views
//! only count items whose window covers the period; scenario totals count
//! every item as if perpetually active.

pub mod activation;
pub mod cumulative;
pub mod normalize;
pub mod period;
pub mod summary;
pub mod viability;

pub use activation::{is_active_in_period, ItemWindow};
pub use cumulative::{cumulative_analytics, timeline_series, CumulativeAnalytics};
pub use normalize::normalized_monthly_value;
pub use period::{
    period_analytics, period_category_analytics, range_analytics, CategoryFlow, PeriodAnalytics,
};
pub use summary::{
    category_breakdown, scenario_analytics, steady_state_total, CategoryShare, Runway,
    ScenarioAnalytics,
};
pub use viability::{validate_scenario_viability, ViabilityError, ViabilityReport};

#[cfg(test)]
pub(crate) mod fixtures {
    use plan_core::{FinancialItem, Frequency, ItemKind};
    use rust_decimal::Decimal;

    pub fn item(
        id: &str,
        kind: ItemKind,
        value: i64,
        frequency: Frequency,
        starts_at: u32,
    ) -> FinancialItem {
        let category = match kind {
            ItemKind::Revenue => "Sales",
            ItemKind::Cost => "Operations",
        };
        FinancialItem::new(
            id,
            id,
            category,
            kind,
            Decimal::new(value, 0),
            frequency,
            starts_at,
        )
    }

    pub fn revenue(id: &str, value: i64, frequency: Frequency) -> FinancialItem {
        item(id, ItemKind::Revenue, value, frequency, 1)
    }

    pub fn cost(id: &str, value: i64, frequency: Frequency) -> FinancialItem {
        item(id, ItemKind::Cost, value, frequency, 1)
    }
}
