#![deny(warnings)]

//! Core domain models and invariants for the scenario planner.
//!
//! This crate defines the serializable scenario and financial item types fed
//! to the analytics engine, with validation helpers the calling layer runs
//! before data reaches the engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

mod coerce;
pub mod config;
pub mod money;
pub mod payload;
pub mod timeline;

pub use config::{ConfigError, EngineConfig};
pub use money::format_currency;
pub use payload::{CreateScenarioPayload, GeneratedItem, PayloadError};
pub use timeline::{generate_periods, Granularity, TimePeriod};

/// Opaque identifier of a financial item, unique within its scenario.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

/// Opaque identifier of a scenario.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub String);

/// Whether an item brings money in or takes it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Money coming in.
    Revenue,
    /// Money going out. Unrecognised `type` strings land here too.
    #[serde(other)]
    Cost,
}

/// How often an item's nominal value recurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Value is charged every period.
    Monthly,
    /// Value is charged once.
    OneTime,
    /// Value is charged once per twelve periods.
    Yearly,
    /// Anything else the producer sent; normalizes to the raw value.
    #[serde(other)]
    Unknown,
}

/// A dated revenue or cost line owned by a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialItem {
    /// Item identifier.
    pub id: ItemId,
    /// Owning scenario, absent on unsaved items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_id: Option<ScenarioId>,
    /// Display title.
    pub title: String,
    /// Free-form grouping key, e.g. "Personnel".
    #[serde(default)]
    pub category: String,
    /// Revenue or cost.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Nominal amount in the scenario currency (>= 0).
    pub value: Decimal,
    /// Recurrence of `value`.
    pub frequency: Frequency,
    /// First active period, 1-based.
    #[serde(deserialize_with = "coerce::period_index")]
    pub starts_at: u32,
    /// Last active period, 1-based and inclusive. `None`, `0` or a value
    /// below `starts_at` all mean open-ended.
    #[serde(default, deserialize_with = "coerce::optional_period_index")]
    pub ends_at: Option<u32>,
}

impl FinancialItem {
    /// Builds an open-ended item with an empty scenario reference.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        kind: ItemKind,
        value: Decimal,
        frequency: Frequency,
        starts_at: u32,
    ) -> Self {
        Self {
            id: ItemId(id.into()),
            scenario_id: None,
            title: title.into(),
            category: category.into(),
            kind,
            value,
            frequency,
            starts_at,
            ends_at: None,
        }
    }

    /// Returns the item with `ends_at` set.
    pub fn ending_at(mut self, ends_at: u32) -> Self {
        self.ends_at = Some(ends_at);
        self
    }
}

/// A user's financial model over a fixed number of periods.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario identifier.
    pub id: ScenarioId,
    /// Owner.
    pub user_id: String,
    /// Display title.
    pub title: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owned items.
    #[serde(default)]
    pub financial_items: Vec<FinancialItem>,
    /// Number of modeled periods (> 0).
    #[serde(deserialize_with = "coerce::period_index")]
    pub timeline_length: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    /// Items of the given kind, in stored order.
    pub fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &FinancialItem> {
        self.financial_items.iter().filter(move |i| i.kind == kind)
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Titles must contain something other than whitespace.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Category must contain something other than whitespace.
    #[error("category of item {0} must not be empty")]
    EmptyCategory(String),
    /// Monetary values must be non-negative.
    #[error("value of item {0} must not be negative")]
    NegativeValue(String),
    /// Start periods are 1-based.
    #[error("item {0} must start at period 1 or later")]
    StartOutOfRange(String),
    /// A scenario needs at least one period.
    #[error("timeline length must be > 0")]
    EmptyTimeline,
    /// Item ids must be unique within a scenario.
    #[error("duplicate item id: {0}")]
    DuplicateItemId(String),
}

/// Validate a single financial item.
pub fn validate_item(item: &FinancialItem) -> Result<(), ValidationError> {
    if item.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if item.category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory(item.id.0.clone()));
    }
    if item.value < Decimal::ZERO {
        return Err(ValidationError::NegativeValue(item.id.0.clone()));
    }
    if item.starts_at == 0 {
        return Err(ValidationError::StartOutOfRange(item.id.0.clone()));
    }
    Ok(())
}

/// Validate a scenario and every item it owns.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if scenario.timeline_length == 0 {
        return Err(ValidationError::EmptyTimeline);
    }
    let mut ids: BTreeSet<&ItemId> = BTreeSet::new();
    for item in &scenario.financial_items {
        validate_item(item)?;
        if !ids.insert(&item.id) {
            return Err(ValidationError::DuplicateItemId(item.id.0.clone()));
        }
    }
    Ok(())
}
