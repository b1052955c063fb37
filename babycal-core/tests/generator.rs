//! End-to-end tests for the generator: cache hits, misses and races.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use babycal_core::output::decode_json;
use babycal_core::{
    BabycalError, Generator, Offset, OutputFormat, PeriodDefinition, PeriodSet, RequestOptions,
    ResultCache,
};
use chrono::NaiveDate;
use tempfile::TempDir;

fn periods() -> Arc<PeriodSet> {
    Arc::new(PeriodSet::new(vec![
        PeriodDefinition::new(Offset::new(0, 0, 0, 0)).with_glyph("🎂"),
        PeriodDefinition::new(Offset::new(0, 0, 1, 0))
            .with_categories(["wochen"])
            .with_glyph("🎉"),
        PeriodDefinition::new(Offset::new(0, 0, 0, 100)).with_categories(["tage"]),
        PeriodDefinition::new(Offset::new(1, 0, 0, 0)).with_categories(["jahre"]),
    ]))
}

fn setup() -> (TempDir, Generator) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let generator = Generator::new(periods(), ResultCache::new(dir.path())).with_version("9.9.9");
    (dir, generator)
}

fn options() -> RequestOptions {
    RequestOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).with_name("Lea")
}

#[test]
fn test_miss_then_hit_returns_identical_bytes() {
    let (_dir, generator) = setup();
    let options = options().with_format(OutputFormat::Ical);

    let first = generator.render(&options).unwrap();
    assert!(!first.from_cache);

    let path = generator.cache().path_for(&generator.fingerprint(&options));
    assert!(path.exists(), "Expected cache file at {}", path.display());

    let second = generator.render(&options).unwrap();
    assert!(second.from_cache);
    assert_eq!(first.body, second.body);
}

#[test]
fn test_long_multibyte_name_and_exclusions_are_cached() {
    let (_dir, generator) = setup();
    let excluded: Vec<String> = (0..30)
        .map(|i| format!("kategorie-{i}-{}", "ä".repeat(10)))
        .collect();
    let options = RequestOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .with_name("語".repeat(120))
        .with_excluded(excluded)
        .with_glyph(true);

    let first = generator.render(&options).unwrap();
    assert!(!first.from_cache);
    assert!(generator.cache().path_for(&generator.fingerprint(&options)).exists());

    let second = generator.render(&options).unwrap();
    assert!(second.from_cache);
    assert_eq!(first.body, second.body);
}

#[test]
fn test_cached_blob_is_returned_verbatim() {
    let (_dir, generator) = setup();
    let options = options();
    let first = generator.render(&options).unwrap();

    // The generation timestamp is frozen in the cached blob.
    let path = generator.cache().path_for(&generator.fingerprint(&options));
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, first.body);

    let again = generator.render(&options).unwrap();
    assert_eq!(
        decode_json(&again.body).unwrap().generated_date,
        decode_json(&first.body).unwrap().generated_date
    );
}

#[test]
fn test_exclusions_flow_through_to_json() {
    let (_dir, generator) = setup();
    let options = options().with_excluded(["wochen", "jahre"]);

    let rendered = generator.render(&options).unwrap();
    let document = decode_json(&rendered.body).unwrap();

    let ids: Vec<_> = document.results.iter().map(|r| r.result_id.as_str()).collect();
    assert_eq!(ids, vec!["0-0-0-0", "0-0-0-100"]);
    assert_eq!(document.excluded_categories, vec!["jahre", "wochen"]);
    assert_eq!(document.results[0].formatted_time_period, "Geburtstag");
}

#[test]
fn test_different_requests_use_different_files() {
    let (dir, generator) = setup();

    generator.render(&options()).unwrap();
    generator.render(&options().with_glyph(true)).unwrap();
    generator
        .render(&options().with_format(OutputFormat::Ical))
        .unwrap();

    let files = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(files, 3);
}

#[test]
fn test_corrupt_cache_file_triggers_recompute() {
    let (_dir, generator) = setup();
    let options = options();
    let path = generator.cache().path_for(&generator.fingerprint(&options));
    std::fs::write(&path, b"garbage").unwrap();

    let rendered = generator.render(&options).unwrap();
    assert!(!rendered.from_cache);
    assert!(decode_json(&rendered.body).is_ok());
    assert_eq!(std::fs::read(&path).unwrap(), rendered.body);
}

#[test]
fn test_cache_write_failure_still_returns_body() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let generator = Generator::new(periods(), ResultCache::new(blocker.join("cache")));

    let rendered = generator.render(&options()).unwrap();
    assert!(!rendered.from_cache);
    assert_eq!(decode_json(&rendered.body).unwrap().results.len(), 4);
}

#[test]
fn test_encode_failure_writes_nothing() {
    let (dir, _) = setup();
    let periods = Arc::new(PeriodSet::new(vec![PeriodDefinition::new(Offset::new(
        0, 0, 0, 0,
    ))]));
    let generator = Generator::new(periods, ResultCache::new(dir.path()));
    // No day after the last representable date, so DTEND cannot be encoded.
    let options = RequestOptions::new(NaiveDate::MAX).with_format(OutputFormat::Ical);

    let err = generator.render(&options).unwrap_err();
    assert!(matches!(err, BabycalError::Encode(_)), "got {err:?}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_concurrent_identical_requests_agree() {
    let (dir, generator) = setup();
    let options = options().with_format(OutputFormat::Ical);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let generator = generator.clone();
            let options = options.clone();
            thread::spawn(move || generator.render(&options).unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Bodies only differ in the encode-time stamps; strip them before comparing.
    let normalize = |body: &[u8]| -> Vec<String> {
        String::from_utf8_lossy(body)
            .lines()
            .filter(|l| {
                !l.starts_with("CREATED:")
                    && !l.starts_with("DTSTAMP:")
                    && !l.starts_with("LAST-MODIFIED:")
            })
            .map(str::to_string)
            .collect()
    };
    let expected = normalize(&results[0].body);
    for rendered in &results {
        assert_eq!(normalize(&rendered.body), expected);
    }

    // One complete cache file, matching one of the rendered bodies.
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1, "Leftover files: {files:?}");
    let cached = std::fs::read(&files[0]).unwrap();
    assert!(results.iter().any(|r| r.body == cached));
    assert_eq!(normalize(&cached), expected);
}

#[test]
fn test_unparsable_date_never_fails_and_empty_exclusions_are_fine() {
    let (_dir, generator) = setup();
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let date = babycal_core::request::parse_reference_date(Some("not-a-date"), today);
    let options = RequestOptions::new(date).with_excluded(BTreeSet::<String>::new());

    let rendered = generator.render(&options).unwrap();
    let document = decode_json(&rendered.body).unwrap();
    assert_eq!(document.based_on_date, "2026-10-19");
}

#[test]
fn test_bundled_periods_load() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/periods.json");
    let periods = PeriodSet::load(&path).unwrap();

    assert!(periods.len() > 50);
    assert!(periods.categories().contains("schwangerschaft"));
    assert!(periods.iter().all(|p| !p.glyph.is_empty()));
}
