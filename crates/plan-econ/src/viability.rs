//! First-period solvency check.

use crate::activation::is_active_in_period;
use crate::normalize::normalized_monthly_value;
use plan_core::{format_currency, EngineConfig, FinancialItem, Frequency, ItemKind};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Reasons a scenario is not viable. Reported, never returned as `Err`.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViabilityError {
    /// First-period cost exceeds what is available in that period.
    #[serde(rename_all = "camelCase")]
    #[error(
        "Insufficient funds in the first month: short by {shortfall_text} \
         (cost {first_month_cost_text}, available {total_available_text})"
    )]
    Shortfall {
        shortfall: Decimal,
        first_month_cost: Decimal,
        total_available: Decimal,
        #[serde(skip)]
        shortfall_text: String,
        #[serde(skip)]
        first_month_cost_text: String,
        #[serde(skip)]
        total_available_text: String,
    },
}

/// Outcome of [`validate_scenario_viability`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViabilityReport {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ViabilityError>,
    /// Normalized cost of items active in period 0.
    pub first_month_cost: Decimal,
    /// Normalized recurring revenue plus the full value of one-time revenue
    /// active in period 0.
    pub total_available: Decimal,
}

impl ViabilityReport {
    /// Human-readable error, if any.
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Check whether period-0 revenue covers period-0 cost.
///
/// Only items active in the first period count. One-time revenue counts at
/// its full value since it is cash on hand in that period; recurring revenue
/// and costs use their per-period equivalent. Advisory: callers decide
/// whether an invalid report blocks anything.
pub fn validate_scenario_viability(
    items: &[FinancialItem],
    timeline_length: u32,
    config: &EngineConfig,
) -> ViabilityReport {
    let mut one_time_revenue = Decimal::ZERO;
    let mut recurring_revenue = Decimal::ZERO;
    let mut first_month_cost = Decimal::ZERO;
    for item in items.iter().filter(|i| is_active_in_period(i, 0)) {
        match (item.kind, item.frequency) {
            (ItemKind::Revenue, Frequency::OneTime) => {
                one_time_revenue = one_time_revenue.saturating_add(item.value)
            }
            (ItemKind::Revenue, _) => {
                recurring_revenue = recurring_revenue
                    .saturating_add(normalized_monthly_value(item, timeline_length))
            }
            (ItemKind::Cost, _) => {
                first_month_cost =
                    first_month_cost.saturating_add(normalized_monthly_value(item, timeline_length))
            }
        }
    }
    let total_available = recurring_revenue.saturating_add(one_time_revenue);

    if total_available < first_month_cost {
        let shortfall = first_month_cost.saturating_sub(total_available);
        debug!(%shortfall, %first_month_cost, %total_available, "first month not covered");
        let symbol = config.currency_symbol.as_str();
        return ViabilityReport {
            is_valid: false,
            error: Some(ViabilityError::Shortfall {
                shortfall,
                first_month_cost,
                total_available,
                shortfall_text: format_currency(shortfall, symbol),
                first_month_cost_text: format_currency(first_month_cost, symbol),
                total_available_text: format_currency(total_available, symbol),
            }),
            first_month_cost,
            total_available,
        };
    }
    ViabilityReport {
        is_valid: true,
        error: None,
        first_month_cost,
        total_available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cost, item, revenue};

    fn d(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    #[test]
    fn shortfall_is_reported_with_currency() {
        let items = vec![
            revenue("sales", 10_000, Frequency::Monthly),
            cost("payroll", 15_000, Frequency::Monthly),
        ];
        let r = validate_scenario_viability(&items, 12, &EngineConfig::default());
        assert!(!r.is_valid);
        assert_eq!(r.first_month_cost, d(15_000));
        assert_eq!(r.total_available, d(10_000));
        match r.error.as_ref().unwrap() {
            ViabilityError::Shortfall { shortfall, .. } => assert_eq!(*shortfall, d(5_000)),
        }
        let msg = r.message().unwrap();
        assert!(msg.contains("$5,000.00"), "{msg}");
        assert!(msg.contains("$15,000.00"), "{msg}");
        assert!(msg.contains("$10,000.00"), "{msg}");
    }

    #[test]
    fn one_time_revenue_is_first_month_cash() {
        let items = vec![
            revenue("seed", 120_000, Frequency::OneTime),
            cost("payroll", 15_000, Frequency::Monthly),
        ];
        let r = validate_scenario_viability(&items, 12, &EngineConfig::default());
        assert!(r.is_valid);
        assert_eq!(r.total_available, d(120_000));
        assert!(r.error.is_none());
    }

    #[test]
    fn recurring_revenue_is_normalized() {
        let items = vec![
            revenue("seed", 1_000, Frequency::OneTime),
            revenue("grant", 60_000, Frequency::Yearly),
            cost("payroll", 15_000, Frequency::Monthly),
        ];
        let r = validate_scenario_viability(&items, 12, &EngineConfig::default());
        assert!(!r.is_valid);
        assert_eq!(r.total_available, d(6_000));
        match r.error.as_ref().unwrap() {
            ViabilityError::Shortfall { shortfall, .. } => assert_eq!(*shortfall, d(9_000)),
        }
    }

    #[test]
    fn demo_bakery_is_viable_with_owner_loan() {
        let payload =
            plan_core::CreateScenarioPayload::from_json_str(include_str!("../../../demos/payload.json"))
                .unwrap();
        let anchor = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let items = payload.to_items(anchor).unwrap();
        let r = validate_scenario_viability(&items, 12, &EngineConfig::default());
        // owner loan 80000 in hand against lease 3500 + ovens 60000/12
        assert_eq!(r.total_available, d(80_000));
        assert_eq!(r.first_month_cost, d(8_500));
        assert!(r.is_valid, "{:?}", r.message());
    }

    #[test]
    fn extreme_values_saturate() {
        let mut a = revenue("a", 0, Frequency::OneTime);
        a.value = Decimal::MAX;
        let mut b = revenue("b", 0, Frequency::OneTime);
        b.value = Decimal::MAX;
        let r = validate_scenario_viability(&[a, b], 12, &EngineConfig::default());
        assert_eq!(r.total_available, Decimal::MAX);
        assert!(r.is_valid);
    }

    #[test]
    fn only_first_period_items_count() {
        let items = vec![
            revenue("sales", 1_000, Frequency::Monthly),
            item("later", ItemKind::Cost, 50_000, Frequency::Monthly, 2),
        ];
        let r = validate_scenario_viability(&items, 12, &EngineConfig::default());
        assert!(r.is_valid);
        assert_eq!(r.first_month_cost, Decimal::ZERO);
    }

    #[test]
    fn empty_scenario_is_viable() {
        let r = validate_scenario_viability(&[], 12, &EngineConfig::default());
        assert!(r.is_valid);
        assert_eq!(r.message(), None);
    }

    #[test]
    fn report_serializes_without_rendered_text() {
        let items = vec![cost("payroll", 100, Frequency::Monthly)];
        let r = validate_scenario_viability(&items, 12, &EngineConfig::default());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["isValid"], serde_json::Value::Bool(false));
        let shortfall = &json["error"]["shortfall"];
        assert!(shortfall.get("firstMonthCost").is_some());
        assert!(shortfall.get("totalAvailable").is_some());
        assert!(shortfall.get("first_month_cost").is_none());
        assert!(shortfall.get("shortfallText").is_none());
    }
}
