//! Applies period definitions to a reference date.

use std::collections::BTreeSet;

use chrono::{Days, Months, NaiveDate};

use crate::error::{BabycalError, BabycalResult};
use crate::period::{Offset, PeriodDefinition, PeriodSet};
use crate::text::format_offset;

/// One computed milestone. Built fresh per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneEntry {
    pub period: PeriodDefinition,
    pub result_date: NaiveDate,
    /// `DD.MM.YYYY`
    pub formatted_date: String,
    /// Derived from the offset only, so stable across reference dates.
    pub id: String,
    pub phrase: String,
    /// Signed whole days from the reference date to `result_date`.
    pub days_between: i64,
}

impl MilestoneEntry {
    pub fn glyph(&self) -> &str {
        &self.period.glyph
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.period.categories
    }
}

/// Compute milestones for every period not hit by `excluded`, sorted by
/// `days_between`. Ties keep the order of the period set.
pub fn compute(
    periods: &PeriodSet,
    reference: NaiveDate,
    excluded: &BTreeSet<String>,
) -> BabycalResult<Vec<MilestoneEntry>> {
    let mut entries = periods
        .iter()
        .filter(|period| !period.is_excluded_by(excluded))
        .map(|period| build_entry(period, reference))
        .collect::<BabycalResult<Vec<_>>>()?;

    // sort_by_key is stable
    entries.sort_by_key(|entry| entry.days_between);
    Ok(entries)
}

fn build_entry(period: &PeriodDefinition, reference: NaiveDate) -> BabycalResult<MilestoneEntry> {
    let offset = period.offset;
    let result_date = apply_offset(reference, &offset)?;

    Ok(MilestoneEntry {
        period: period.clone(),
        result_date,
        formatted_date: result_date.format("%d.%m.%Y").to_string(),
        id: offset.stable_id(),
        phrase: format_offset(offset.years, offset.months, offset.weeks, offset.days),
        days_between: (result_date - reference).num_days(),
    })
}

/// Calendar-aware years/months (clamped to month end), then days, then
/// weeks as plain day arithmetic.
pub fn apply_offset(reference: NaiveDate, offset: &Offset) -> BabycalResult<NaiveDate> {
    let out_of_range = || {
        BabycalError::DateOutOfRange(format!(
            "{} shifted by {} leaves the supported calendar",
            reference,
            offset.stable_id()
        ))
    };

    let total_months = i64::from(offset.years) * 12 + i64::from(offset.months);
    let date = shift_months(reference, total_months).ok_or_else(out_of_range)?;
    let date = shift_days(date, i64::from(offset.days)).ok_or_else(out_of_range)?;
    shift_days(date, i64::from(offset.weeks) * 7).ok_or_else(out_of_range)
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}
