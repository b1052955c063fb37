//! iCalendar feed encoding.

use chrono::{DateTime, Days, NaiveDate, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use super::RenderContext;
use crate::constants::DEFAULT_CALENDAR_NAME;
use crate::error::{BabycalError, BabycalResult};
use crate::milestone::MilestoneEntry;

/// Build a calendar with one all-day event per entry.
///
/// Apart from CREATED/DTSTAMP/LAST-MODIFIED (all set to `now`) the output is
/// fully determined by the entries and the context.
pub fn encode_ics(
    entries: &[MilestoneEntry],
    ctx: &RenderContext<'_>,
    now: DateTime<Utc>,
) -> BabycalResult<Vec<u8>> {
    let mut cal = Calendar::new();

    let calendar_name = if ctx.name.is_empty() {
        DEFAULT_CALENDAR_NAME.to_string()
    } else {
        format!("{} Kalender", ctx.name)
    };
    cal.append_property(Property::new("X-WR-CALNAME", &calendar_name));
    cal.append_property(Property::new(
        "X-WR-CALDESC",
        format!(
            "Auf Basis einer URL generierter Kalender mit {} besonderen Jahrestagen",
            entries.len()
        ),
    ));
    cal.append_property(Property::new("METHOD", "PUBLISH"));

    let stamp = now.format("%Y%m%dT%H%M%SZ").to_string();
    let reference_compact = ctx.reference_date.format("%Y%m%d").to_string();

    for entry in entries {
        let end = entry
            .result_date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| {
                BabycalError::Encode(format!("no day after {} for entry {}", entry.result_date, entry.id))
            })?;

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}-{}-{}", entry.id, reference_compact, ctx.version));
        ics_event.add_property("CREATED", &stamp);
        ics_event.add_property("DTSTAMP", &stamp);
        ics_event.add_property("LAST-MODIFIED", &stamp);
        add_date_property(&mut ics_event, "DTSTART", entry.result_date);
        add_date_property(&mut ics_event, "DTEND", end);
        ics_event.summary(&ctx.summary(entry));
        ics_event.description(&ctx.description(entry));

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Ok(rewrite_prodid(&cal.to_string(), ctx.version).into_bytes())
}

/// The icalendar crate writes its own PRODID; replace it with ours.
fn rewrite_prodid(ics: &str, version: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(&format!("PRODID:-//Baby Calendar//babycal {version}//DE\r\n"));
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// All-day date value, e.g. `DTSTART;VALUE=DATE:20240108`
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
