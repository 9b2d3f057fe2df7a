//! Lenient deserializers for period indices arriving from the write path,
//! where numbers are sometimes sent as strings.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawIndex {
    /// `Ok(None)` for blank strings, `Err` for anything non-numeric.
    fn to_i64(&self) -> Result<Option<i64>, String> {
        match self {
            RawIndex::Int(v) => Ok(Some(*v)),
            RawIndex::Float(v) if v.is_finite() => Ok(Some(v.trunc() as i64)),
            RawIndex::Float(v) => Err(format!("non-finite period index {v}")),
            RawIndex::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                if let Ok(v) = s.parse::<i64>() {
                    return Ok(Some(v));
                }
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| Some(v.trunc() as i64))
                    .ok_or_else(|| format!("invalid period index {s:?}"))
            }
        }
    }
}

fn clamp_u32(v: i64) -> u32 {
    u32::try_from(v.max(0)).unwrap_or(u32::MAX)
}

/// Required index: negative values clamp to 0.
pub(crate) fn period_index<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawIndex::deserialize(deserializer)?;
    match raw.to_i64().map_err(D::Error::custom)? {
        Some(v) => {
            if v < 0 {
                warn!(value = v, "negative period index clamped to 0");
            }
            Ok(clamp_u32(v))
        }
        None => Err(D::Error::custom("missing period index")),
    }
}

/// Optional index: null, blank and negative values become `None`.
pub(crate) fn optional_period_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawIndex>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    Ok(raw
        .to_i64()
        .map_err(D::Error::custom)?
        .filter(|v| *v >= 0)
        .map(clamp_u32))
}
