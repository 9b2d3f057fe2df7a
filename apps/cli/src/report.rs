//! Scenario report assembly and plain-text rendering.

use chrono::NaiveDate;
use plan_core::{format_currency, generate_periods, EngineConfig, Granularity, Scenario, TimePeriod};
use plan_econ::{
    range_analytics, scenario_analytics, timeline_series, validate_scenario_viability,
    CategoryShare, PeriodAnalytics, ScenarioAnalytics, ViabilityReport,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRow {
    pub period: TimePeriod,
    pub analytics: PeriodAnalytics,
    /// Carry-forward balance at the end of the period.
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub scenario_id: String,
    pub title: String,
    pub timeline_length: u32,
    pub periods: Vec<PeriodRow>,
    pub summary: ScenarioAnalytics,
    pub viability: ViabilityReport,
}

pub fn build_report(
    scenario: &Scenario,
    config: &EngineConfig,
    anchor: NaiveDate,
    granularity: Granularity,
) -> Report {
    let items = &scenario.financial_items;
    let n = scenario.timeline_length;
    let series = timeline_series(items, n);
    let periods = generate_periods(anchor, n, granularity)
        .into_iter()
        .map(|period| {
            let analytics = range_analytics(items, period.first_index, period.last_index, n);
            let balance = series
                .get(period.last_index as usize)
                .map(|c| c.carry_forward)
                .unwrap_or_default();
            PeriodRow {
                period,
                analytics,
                balance,
            }
        })
        .collect();
    Report {
        scenario_id: scenario.id.0.clone(),
        title: scenario.title.clone(),
        timeline_length: n,
        periods,
        summary: scenario_analytics(items, n, config),
        viability: validate_scenario_viability(items, n, config),
    }
}

/// Plain-text rendering of a [`Report`] with the configured currency and palette.
pub struct TextReport<'a> {
    pub report: &'a Report,
    pub config: &'a EngineConfig,
}

impl TextReport<'_> {
    fn money(&self, v: Decimal) -> String {
        format_currency(v, &self.config.currency_symbol)
    }

    fn breakdown(&self, f: &mut fmt::Formatter<'_>, heading: &str, shares: &[CategoryShare]) -> fmt::Result {
        if shares.is_empty() {
            return Ok(());
        }
        writeln!(f, "{heading}")?;
        for s in shares {
            let colour = self
                .config
                .palette
                .get(s.color_index)
                .map(String::as_str)
                .unwrap_or("-");
            writeln!(
                f,
                "  {:<20} {:>16} {:>6.1}%  {}",
                s.name,
                self.money(s.value),
                s.percent,
                colour
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(
            f,
            "Scenario {} | {} | {} periods",
            report.scenario_id, report.title, report.timeline_length
        )?;
        writeln!(
            f,
            "{:<10} {:>16} {:>16} {:>16} {:>16}",
            "Period", "Revenue", "Cost", "Net", "Balance"
        )?;
        for row in &report.periods {
            writeln!(
                f,
                "{:<10} {:>16} {:>16} {:>16} {:>16}",
                row.period.label,
                self.money(row.analytics.revenue),
                self.money(row.analytics.cost),
                self.money(row.analytics.net),
                self.money(row.balance)
            )?;
        }
        let s = &report.summary;
        writeln!(
            f,
            "Monthly rate | revenue: {} | cost: {} | burn: {} ({:.1}%) | runway: {}",
            self.money(s.total_revenue),
            self.money(s.total_cost),
            self.money(s.burn_rate),
            s.burn_rate_percent,
            s.runway
        )?;
        self.breakdown(f, "Costs by category", &s.cost_by_category)?;
        self.breakdown(f, "Revenue by category", &s.revenue_by_category)?;
        match report.viability.message() {
            Some(msg) => writeln!(f, "Viability: WARNING {msg}"),
            None => writeln!(f, "Viability: OK"),
        }
    }
}
