//! JSON list encoding.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::RenderContext;
use crate::error::{BabycalError, BabycalResult};
use crate::milestone::MilestoneEntry;

/// Top-level JSON response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDocument {
    /// RFC 3339 time of the cache miss that produced this document.
    pub generated_date: String,
    pub based_on_date: String,
    pub name: String,
    pub excluded_categories: Vec<String>,
    pub results: Vec<EntryRecord>,
}

/// One milestone as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// `[years, months, weeks, days]`
    pub original_values: [i32; 4],
    pub result_date: String,
    pub formatted_date: String,
    pub result_id: String,
    pub formatted_time_period: String,
    pub days_between: i64,
    pub summary: String,
    pub description: String,
}

impl EntryRecord {
    pub fn from_entry(entry: &MilestoneEntry, ctx: &RenderContext<'_>) -> Self {
        EntryRecord {
            original_values: entry.period.offset.as_array(),
            result_date: entry.result_date.format("%Y-%m-%d").to_string(),
            formatted_date: entry.formatted_date.clone(),
            result_id: entry.id.clone(),
            formatted_time_period: entry.phrase.clone(),
            days_between: entry.days_between,
            summary: ctx.summary(entry),
            description: ctx.description(entry),
        }
    }
}

/// Serialize entries as a pretty-printed [`CalendarDocument`].
pub fn encode_json(
    entries: &[MilestoneEntry],
    ctx: &RenderContext<'_>,
    excluded: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> BabycalResult<Vec<u8>> {
    let document = CalendarDocument {
        generated_date: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        based_on_date: ctx.reference_date.format("%Y-%m-%d").to_string(),
        name: ctx.name.to_string(),
        excluded_categories: excluded.iter().cloned().collect(),
        results: entries
            .iter()
            .map(|entry| EntryRecord::from_entry(entry, ctx))
            .collect(),
    };

    serde_json::to_vec_pretty(&document).map_err(|e| BabycalError::Encode(e.to_string()))
}

pub fn decode_json(bytes: &[u8]) -> BabycalResult<CalendarDocument> {
    serde_json::from_slice(bytes).map_err(|e| BabycalError::Encode(e.to_string()))
}
