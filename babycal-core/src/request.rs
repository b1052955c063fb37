//! Request options shared by the HTTP and CLI front ends.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BabycalError;

/// Wire format of a rendered calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Ical,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Ical => "ical",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Ical => "text/calendar",
        }
    }

    /// Suggested download filename, if the format is meant to be saved.
    pub fn attachment_filename(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Json => None,
            OutputFormat::Ical => Some("calendar.ics"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = BabycalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "ical" => Ok(OutputFormat::Ical),
            _ => Err(BabycalError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Everything that determines one rendered calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub reference_date: NaiveDate,
    /// Already sanitized display name; empty means unnamed.
    pub name: String,
    pub excluded: BTreeSet<String>,
    pub include_glyph: bool,
    pub format: OutputFormat,
}

impl RequestOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        RequestOptions {
            reference_date,
            name: String::new(),
            excluded: BTreeSet::new(),
            include_glyph: false,
            format: OutputFormat::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_excluded<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(categories.into_iter().map(Into::into));
        self
    }

    pub fn with_glyph(mut self, include_glyph: bool) -> Self {
        self.include_glyph = include_glyph;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Parse `YYYY-MM-DD`, falling back to `today` when absent or invalid.
pub fn parse_reference_date(input: Option<&str>, today: NaiveDate) -> NaiveDate {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => today,
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|e| {
            debug!(input = raw, error = %e, "Unparsable reference date, using today");
            today
        }),
    }
}

/// Interpret a query/CLI toggle value. `None` for anything unrecognized.
pub fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma separated category list, dropping blanks.
pub fn split_categories(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
