//! Wire encodings of a milestone list.

mod ics;
mod json;

use chrono::NaiveDate;

use crate::milestone::MilestoneEntry;
use crate::text::{format_description, format_summary};

pub use ics::encode_ics;
pub use json::{CalendarDocument, EntryRecord, decode_json, encode_json};

/// Request-level data every encoder needs next to the entries.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub reference_date: NaiveDate,
    pub name: &'a str,
    pub include_glyph: bool,
    pub version: &'a str,
}

impl RenderContext<'_> {
    fn summary(&self, entry: &MilestoneEntry) -> String {
        format_summary(self.name, &entry.phrase, self.include_glyph, entry.glyph())
    }

    fn description(&self, entry: &MilestoneEntry) -> String {
        format_description(self.name, entry.days_between)
    }
}
