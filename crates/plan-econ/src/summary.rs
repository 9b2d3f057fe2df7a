//! Scenario-wide analytics on the steady-state view.
//!
//! Totals here sum the normalized value of *every* item regardless of its
//! start/end window: they describe the current monthly rate, not any one
//! period. Use [`crate::period`] for window-aware figures.

use crate::normalize::normalized_monthly_value;
use plan_core::{EngineConfig, FinancialItem, ItemKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Months until cash runs out at the current burn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "months", rename_all = "snake_case")]
pub enum Runway {
    /// Whole months of revenue-funded buffer.
    Months(u64),
    /// Revenue covers cost; the scenario never depletes.
    Indefinite,
}

impl Runway {
    pub fn months(self) -> Option<u64> {
        match self {
            Runway::Months(m) => Some(m),
            Runway::Indefinite => None,
        }
    }

    pub fn is_indefinite(self) -> bool {
        matches!(self, Runway::Indefinite)
    }
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::Months(1) => write!(f, "1 month"),
            Runway::Months(m) => write!(f, "{m} months"),
            Runway::Indefinite => write!(f, "indefinite"),
        }
    }
}

/// One slice of a category breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub name: String,
    pub value: Decimal,
    /// Share of the kind's total, 0..=100.
    pub percent: Decimal,
    /// Palette slot, by position after sorting.
    pub color_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAnalytics {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    /// Cost in excess of revenue; negative when profitable.
    pub burn_rate: Decimal,
    /// Cost as a percentage of revenue, 0 without revenue.
    pub burn_rate_percent: Decimal,
    pub runway: Runway,
    pub cost_by_category: Vec<CategoryShare>,
    pub revenue_by_category: Vec<CategoryShare>,
}

/// Sum of normalized values of every item of `kind`, ignoring windows.
pub fn steady_state_total(items: &[FinancialItem], kind: ItemKind, timeline_length: u32) -> Decimal {
    items
        .iter()
        .filter(|i| i.kind == kind)
        .map(|i| normalized_monthly_value(i, timeline_length))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn percent_of(value: Decimal, total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        value
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

/// Steady-state totals of `kind` grouped by category, largest first.
///
/// Ties keep first-seen order so colour assignment is reproducible.
pub fn category_breakdown(
    items: &[FinancialItem],
    kind: ItemKind,
    timeline_length: u32,
    config: &EngineConfig,
) -> Vec<CategoryShare> {
    let mut totals: Vec<(&str, Decimal)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for item in items.iter().filter(|i| i.kind == kind) {
        let label = config.category_label(&item.category);
        let slot = *slots.entry(label).or_insert_with(|| {
            totals.push((label, Decimal::ZERO));
            totals.len() - 1
        });
        let entry = &mut totals[slot].1;
        *entry = entry.saturating_add(normalized_monthly_value(item, timeline_length));
    }
    // stable: equal values stay in first-seen order
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let total = totals
        .iter()
        .map(|(_, v)| *v)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let palette = config.palette_size();
    totals
        .into_iter()
        .enumerate()
        .map(|(position, (name, value))| CategoryShare {
            name: name.to_string(),
            value,
            percent: percent_of(value, total),
            color_index: position % palette,
        })
        .collect()
}

/// Whole-scenario totals, burn rate, runway and category breakdowns.
///
/// Example:
/// // cost 15000/month against revenue 10000/month
/// // => burn_rate 5000, burn_rate_percent 150, runway 2 months
pub fn scenario_analytics(
    items: &[FinancialItem],
    timeline_length: u32,
    config: &EngineConfig,
) -> ScenarioAnalytics {
    let total_revenue = steady_state_total(items, ItemKind::Revenue, timeline_length);
    let total_cost = steady_state_total(items, ItemKind::Cost, timeline_length);
    let burn_rate = total_cost.saturating_sub(total_revenue);
    let runway = if burn_rate > Decimal::ZERO {
        let months = total_revenue
            .checked_div(burn_rate)
            .and_then(|m| m.floor().to_u64())
            .unwrap_or(u64::MAX);
        Runway::Months(months)
    } else {
        Runway::Indefinite
    };
    debug!(
        %total_revenue,
        %total_cost,
        %burn_rate,
        %runway,
        items = items.len(),
        "scenario analytics"
    );
    ScenarioAnalytics {
        total_revenue,
        total_cost,
        burn_rate,
        burn_rate_percent: percent_of(total_cost, total_revenue),
        runway,
        cost_by_category: category_breakdown(items, ItemKind::Cost, timeline_length, config),
        revenue_by_category: category_breakdown(items, ItemKind::Revenue, timeline_length, config),
    }
}
