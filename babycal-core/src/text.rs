//! Human-readable (German) phrases for offsets and calendar entries.

use crate::constants::ANNIVERSARY_PHRASE;

const CONJUNCTION: &str = " und ";

/// Singular/plural noun pair for one offset component.
struct Unit {
    singular: &'static str,
    plural: &'static str,
}

const YEAR: Unit = Unit {
    singular: "Jahr",
    plural: "Jahre",
};
const MONTH: Unit = Unit {
    singular: "Monat",
    plural: "Monate",
};
const WEEK: Unit = Unit {
    singular: "Woche",
    plural: "Wochen",
};
const DAY: Unit = Unit {
    singular: "Tag",
    plural: "Tage",
};

impl Unit {
    fn count(&self, value: i64) -> String {
        if value == 1 {
            format!("1 {}", self.singular)
        } else {
            format!("{} {}", value, self.plural)
        }
    }
}

/// Phrase for an offset, e.g. `2 Jahre und 3 Monate`.
///
/// Zero components are skipped; an all-zero offset is the anniversary phrase.
pub fn format_offset(years: i32, months: i32, weeks: i32, days: i32) -> String {
    let clauses: Vec<String> = [(years, &YEAR), (months, &MONTH), (weeks, &WEEK), (days, &DAY)]
        .into_iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, unit)| unit.count(i64::from(value)))
        .collect();

    match clauses.as_slice() {
        [] => ANNIVERSARY_PHRASE.to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}{}{}", init.join(", "), CONJUNCTION, last),
    }
}

/// Event title: optional glyph, optional name, then the offset phrase.
pub fn format_summary(name: &str, phrase: &str, include_glyph: bool, glyph: &str) -> String {
    let text = if name.is_empty() {
        phrase.to_string()
    } else {
        format!("{name}: {phrase}")
    };

    if include_glyph && !glyph.is_empty() {
        format!("{glyph} {text}")
    } else {
        text
    }
}

/// Event description relative to the reference (birth) date.
///
/// `days_between > 0` means the milestone lies after the reference date.
pub fn format_description(name: &str, days_between: i64) -> String {
    let days = DAY.count(days_between.abs());
    match (name.is_empty(), days_between > 0) {
        (false, true) => format!("{name} ist heute {days} alt."),
        (false, false) => format!("Noch {days} bis zur Geburt von {name}."),
        (true, true) => format!("Heute sind es {days} seit der Geburt."),
        (true, false) => format!("Noch {days} bis zur Geburt."),
    }
}
