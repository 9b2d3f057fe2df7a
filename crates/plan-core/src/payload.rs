//! Scenario creation payloads from the generation path, where item start and
//! end are calendar dates rather than period indices.

use crate::timeline::period_index_for_date;
use crate::{FinancialItem, Frequency, ItemId, ItemKind, Scenario, ScenarioId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item {item}: invalid date {value:?}")]
    InvalidDate { item: String, value: String },
}

/// An item as produced by the generator, dated by calendar.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItem {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub value: Decimal,
    pub frequency: Frequency,
    /// `YYYY-MM-DD`, `YYYY-MM` or an RFC 3339 timestamp.
    pub starts_at: String,
    #[serde(default)]
    pub ends_at: Option<String>,
}

/// Request body for creating a scenario with an initial item batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenarioPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub financial_items: Option<Vec<GeneratedItem>>,
    #[serde(default)]
    pub timeline_length: Option<u32>,
}

/// Parse the date forms the generator emits.
pub fn parse_period_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}

impl CreateScenarioPayload {
    pub fn from_json_str(text: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Convert generated items to period-indexed items on a timeline that
    /// starts at `anchor`. Missing ids become `gen-{n}`.
    pub fn to_items(&self, anchor: NaiveDate) -> Result<Vec<FinancialItem>, PayloadError> {
        let generated = self.financial_items.as_deref().unwrap_or_default();
        let mut items = Vec::with_capacity(generated.len());
        for (n, g) in generated.iter().enumerate() {
            let id = g.id.clone().unwrap_or_else(|| format!("gen-{n}"));
            let start = parse_period_date(&g.starts_at).ok_or_else(|| PayloadError::InvalidDate {
                item: id.clone(),
                value: g.starts_at.clone(),
            })?;
            let ends_at = match g.ends_at.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(text) => match parse_period_date(text) {
                    Some(end) => Some(period_index_for_date(anchor, end)),
                    None => {
                        warn!(item = %id, value = text, "unparseable end date treated as open-ended");
                        None
                    }
                },
            };
            items.push(FinancialItem {
                id: ItemId(id),
                scenario_id: None,
                title: g.title.clone(),
                category: g.category.clone(),
                kind: g.kind,
                value: g.value,
                frequency: g.frequency,
                starts_at: period_index_for_date(anchor, start),
                ends_at,
            });
        }
        debug!(count = items.len(), %anchor, "converted generated items");
        Ok(items)
    }

    /// Build a scenario from the payload. `default_timeline_length` applies
    /// when the payload doesn't carry one.
    pub fn into_scenario(
        self,
        id: ScenarioId,
        user_id: impl Into<String>,
        anchor: NaiveDate,
        default_timeline_length: u32,
        now: DateTime<Utc>,
    ) -> Result<Scenario, PayloadError> {
        let mut items = self.to_items(anchor)?;
        for item in &mut items {
            item.scenario_id = Some(id.clone());
        }
        Ok(Scenario {
            id,
            user_id: user_id.into(),
            title: self.title,
            description: self.description,
            financial_items: items,
            timeline_length: self.timeline_length.unwrap_or(default_timeline_length),
            created_at: now,
            updated_at: now,
        })
    }
}
