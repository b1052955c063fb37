//! Time-period definitions and the store that loads them.
//!
//! A period source is a JSON array. Each entry is either an object
//!
//! ```json
//! { "years": 0, "months": 6, "weeks": 0, "days": 0, "categories": ["monate"], "glyph": "🎈" }
//! ```
//!
//! or the positional form `[years, months, weeks, days, categories?, glyph?]`.
//! Both are normalized into [`PeriodDefinition`] at load time.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_GLYPH;
use crate::error::{BabycalError, BabycalResult};

/// Offset from the reference date, split into calendar components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub years: i32,
    pub months: i32,
    pub weeks: i32,
    pub days: i32,
}

impl Offset {
    pub fn new(years: i32, months: i32, weeks: i32, days: i32) -> Self {
        Offset {
            years,
            months,
            weeks,
            days,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_array() == [0, 0, 0, 0]
    }

    /// Components in `[years, months, weeks, days]` order.
    pub fn as_array(&self) -> [i32; 4] {
        [self.years, self.months, self.weeks, self.days]
    }

    /// Identifier derived from the raw components only, e.g. `0-6-0-0`.
    pub fn stable_id(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.years, self.months, self.weeks, self.days
        )
    }
}

/// A single rule: "this far from the reference date is a milestone".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodDefinition {
    pub offset: Offset,
    pub categories: BTreeSet<String>,
    pub glyph: String,
}

impl PeriodDefinition {
    pub fn new(offset: Offset) -> Self {
        PeriodDefinition {
            offset,
            categories: BTreeSet::new(),
            glyph: DEFAULT_GLYPH.to_string(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = glyph.into();
        self
    }

    /// True if any of this period's categories is in `excluded`.
    pub fn is_excluded_by(&self, excluded: &BTreeSet<String>) -> bool {
        !self.categories.is_disjoint(excluded)
    }
}

/// Object encoding of a period entry.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedPeriod {
    #[serde(default)]
    years: i32,
    #[serde(default)]
    months: i32,
    #[serde(default)]
    weeks: i32,
    #[serde(default)]
    days: i32,
    #[serde(default)]
    categories: Option<Value>,
    #[serde(default)]
    glyph: Option<Value>,
}

/// The two accepted shapes of a period entry, told apart by JSON type.
enum PeriodSource {
    Named(NamedPeriod),
    Positional(Vec<Value>),
}

impl PeriodSource {
    fn detect(index: usize, value: Value) -> BabycalResult<Self> {
        match value {
            Value::Array(items) => Ok(PeriodSource::Positional(items)),
            obj @ Value::Object(_) => serde_json::from_value(obj)
                .map(PeriodSource::Named)
                .map_err(|e| BabycalError::Load(format!("entry {index}: {e}"))),
            other => Err(BabycalError::Load(format!(
                "entry {index}: expected an object or an array, got {other}"
            ))),
        }
    }

    fn into_definition(self, index: usize) -> BabycalResult<PeriodDefinition> {
        match self {
            PeriodSource::Named(p) => Ok(PeriodDefinition {
                offset: Offset::new(p.years, p.months, p.weeks, p.days),
                categories: categories_from(p.categories.as_ref()),
                glyph: glyph_from(p.glyph.as_ref()),
            }),
            PeriodSource::Positional(items) => positional_definition(index, &items),
        }
    }
}

fn positional_definition(index: usize, items: &[Value]) -> BabycalResult<PeriodDefinition> {
    if items.len() < 4 {
        return Err(BabycalError::Load(format!(
            "entry {index}: expected at least 4 offset values, got {}",
            items.len()
        )));
    }

    let mut components = [0i32; 4];
    for (slot, item) in components.iter_mut().zip(items) {
        *slot = item
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| {
                BabycalError::Load(format!("entry {index}: offset value {item} is not an integer"))
            })?;
    }
    let [years, months, weeks, days] = components;

    Ok(PeriodDefinition {
        offset: Offset::new(years, months, weeks, days),
        categories: categories_from(items.get(4)),
        glyph: glyph_from(items.get(5)),
    })
}

// Categories and glyph are optional in both encodings: anything unusable
// falls back to a default instead of failing the load.

/// String members of an array; anything else is ignored.
fn categories_from(value: Option<&Value>) -> BTreeSet<String> {
    value
        .and_then(Value::as_array)
        .map(|cats| {
            cats.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn glyph_from(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_GLYPH)
        .to_string()
}

/// Ordered, read-only set of period definitions.
///
/// Loaded once at startup and shared (behind an `Arc`) by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodSet {
    periods: Vec<PeriodDefinition>,
}

impl PeriodSet {
    pub fn new(periods: Vec<PeriodDefinition>) -> Self {
        PeriodSet { periods }
    }

    /// Load periods from a JSON file.
    pub fn load(path: &Path) -> BabycalResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BabycalError::Load(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
            .map_err(|e| BabycalError::Load(format!("{}: {e}", path.display())))
    }

    pub fn from_json_str(content: &str) -> BabycalResult<Self> {
        let raw: Vec<Value> = serde_json::from_str(content)
            .map_err(|e| BabycalError::Load(format!("expected a JSON array of periods: {e}")))?;

        let periods = raw
            .into_iter()
            .enumerate()
            .map(|(index, value)| PeriodSource::detect(index, value)?.into_definition(index))
            .collect::<BabycalResult<Vec<_>>>()?;

        Ok(PeriodSet { periods })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeriodDefinition> {
        self.periods.iter()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Every category used by at least one period.
    pub fn categories(&self) -> BTreeSet<String> {
        self.periods
            .iter()
            .flat_map(|p| p.categories.iter().cloned())
            .collect()
    }
}

impl From<Vec<PeriodDefinition>> for PeriodSet {
    fn from(periods: Vec<PeriodDefinition>) -> Self {
        PeriodSet::new(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_positional_and_named_entries_normalize_to_same_definition() {
        let set = PeriodSet::from_json_str(
            r#"[
                [0, 6, 0, 0, ["monate"], "🎈"],
                {"years": 0, "months": 6, "weeks": 0, "days": 0, "categories": ["monate"], "glyph": "🎈"}
            ]"#,
        )
        .unwrap();

        let periods: Vec<_> = set.iter().collect();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0], periods[1]);
        assert_eq!(periods[0].offset, Offset::new(0, 6, 0, 0));
        assert!(periods[0].categories.contains("monate"));
    }

    #[test]
    fn test_missing_trailing_fields_use_defaults() {
        let set = PeriodSet::from_json_str(r#"[[1, 0, 0, 0], {"weeks": 2}]"#).unwrap();
        let periods: Vec<_> = set.iter().collect();

        assert!(periods[0].categories.is_empty());
        assert_eq!(periods[0].glyph, DEFAULT_GLYPH);
        assert_eq!(periods[1].offset, Offset::new(0, 0, 2, 0));
        assert_eq!(periods[1].glyph, DEFAULT_GLYPH);
    }

    #[test]
    fn test_malformed_trailing_fields_do_not_drop_entry() {
        let set = PeriodSet::from_json_str(r#"[[0, 0, 1, 0, "oops", 42]]"#).unwrap();
        let period = set.iter().next().unwrap();

        assert_eq!(set.len(), 1);
        assert!(period.categories.is_empty());
        assert_eq!(period.glyph, DEFAULT_GLYPH);
    }

    #[test]
    fn test_malformed_named_fields_do_not_drop_entry() {
        let set = PeriodSet::from_json_str(
            r#"[
                {"weeks": 1, "glyph": 42},
                {"days": 3, "categories": null},
                {"months": 2, "categories": ["monate", 7, null], "glyph": null}
            ]"#,
        )
        .unwrap();
        let periods: Vec<_> = set.iter().collect();

        assert_eq!(set.len(), 3);
        assert_eq!(periods[0].glyph, DEFAULT_GLYPH);
        assert!(periods[1].categories.is_empty());
        assert_eq!(periods[2].glyph, DEFAULT_GLYPH);
        let cats: Vec<_> = periods[2].categories.iter().map(String::as_str).collect();
        assert_eq!(cats, vec!["monate"]);

        let positional = PeriodSet::from_json_str(r#"[[0, 0, 1, 0, null, 42]]"#).unwrap();
        assert_eq!(positional.iter().next(), set.iter().next());
    }

    #[test]
    fn test_explicit_empty_glyph_is_kept() {
        let set = PeriodSet::from_json_str(r#"[[1, 0, 0, 0, [], ""]]"#).unwrap();
        assert_eq!(set.iter().next().unwrap().glyph, "");
    }

    #[test]
    fn test_malformed_structure_is_load_error() {
        for bad in [
            r#"{"years": 1}"#,
            r#"[[1, 2]]"#,
            r#"[["a", 0, 0, 0]]"#,
            r#"[42]"#,
            r#"[{"yeers": 1}]"#,
            "not json",
        ] {
            let err = PeriodSet::from_json_str(bad).unwrap_err();
            assert!(
                matches!(err, BabycalError::Load(_)),
                "Expected load error for {bad}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PeriodSet::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BabycalError::Load(_)));
    }

    #[test]
    fn test_load_from_file_preserves_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[[0, 0, 0, 100], [0, 0, 1, 0], [1, 0, 0, 0]]"#).unwrap();

        let set = PeriodSet::load(file.path()).unwrap();
        let ids: Vec<_> = set.iter().map(|p| p.offset.stable_id()).collect();
        assert_eq!(ids, vec!["0-0-0-100", "0-0-1-0", "1-0-0-0"]);
    }

    #[test]
    fn test_categories_union() {
        let set = PeriodSet::new(vec![
            PeriodDefinition::new(Offset::new(0, 0, 1, 0)).with_categories(["wochen"]),
            PeriodDefinition::new(Offset::new(1, 0, 0, 0)).with_categories(["jahre", "wochen"]),
        ]);
        let cats: Vec<_> = set.categories().into_iter().collect();
        assert_eq!(cats, vec!["jahre", "wochen"]);
    }
}
