//! Cache keys derived from request parameters.
//!
//! Segment order and delimiters are part of the on-disk contract: changing
//! them orphans every existing cache file.
//!
//! ```text
//! {date}_{version}_{format}[_ex={cat},{cat}...][_name={name}][_glyph=1]
//! ```
//!
//! Categories are escaped reversibly (`~` plus two hex digits per byte for
//! anything but alphanumerics and `-`). The name segment is a readable
//! transliteration; when that loses information it carries a short digest of
//! the raw name. If the optional segments would push the key past
//! [`MAX_FINGERPRINT_LEN`] bytes, they are replaced by `h={sha256}`.

use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Write as _;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::constants::{MAX_FINGERPRINT_LEN, MAX_FINGERPRINT_NAME_LEN};
use crate::request::{OutputFormat, RequestOptions};

const SEGMENT_DELIMITER: &str = "_";
const CATEGORY_DELIMITER: &str = ",";
const EXCLUDED_TAG: &str = "ex=";
const NAME_TAG: &str = "name=";
const GLYPH_MARKER: &str = "glyph=1";
const DIGEST_TAG: &str = "h=";
const ESCAPE: char = '~';
/// Hex digits of the raw-name digest appended to lossy name segments.
const NAME_DIGEST_LEN: usize = 16;

/// Filesystem-safe cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn fingerprint(
    date: NaiveDate,
    version: &str,
    excluded: &BTreeSet<String>,
    name: &str,
    include_glyph: bool,
    format: OutputFormat,
) -> Fingerprint {
    let head = [
        date.format("%Y-%m-%d").to_string(),
        version.to_string(),
        format.as_str().to_string(),
    ]
    .join(SEGMENT_DELIMITER);

    let mut optional = Vec::new();

    // BTreeSet iteration is sorted, which makes the category list canonical.
    let categories: Vec<String> = excluded
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| escape_category(c))
        .collect();
    if !categories.is_empty() {
        optional.push(format!(
            "{EXCLUDED_TAG}{}",
            categories.join(CATEGORY_DELIMITER)
        ));
    }

    if !name.is_empty() {
        optional.push(format!("{NAME_TAG}{}", name_segment(name)));
    }

    if include_glyph {
        optional.push(GLYPH_MARKER.to_string());
    }

    if optional.is_empty() {
        return Fingerprint(head);
    }

    let tail = optional.join(SEGMENT_DELIMITER);
    if head.len() + SEGMENT_DELIMITER.len() + tail.len() <= MAX_FINGERPRINT_LEN {
        Fingerprint(format!("{head}{SEGMENT_DELIMITER}{tail}"))
    } else {
        Fingerprint(format!(
            "{head}{SEGMENT_DELIMITER}{DIGEST_TAG}{}",
            sha256_hex(tail.as_bytes())
        ))
    }
}

impl RequestOptions {
    pub fn fingerprint(&self, version: &str) -> Fingerprint {
        fingerprint(
            self.reference_date,
            version,
            &self.excluded,
            &self.name,
            self.include_glyph,
            self.format,
        )
    }
}

/// Spaces become `_`, apostrophes and periods vanish, and anything else that
/// is not alphanumeric, `_` or `-` is dropped. Cut to at most
/// [`MAX_FINGERPRINT_NAME_LEN`] bytes on a character boundary.
pub fn name_to_filename(name: &str) -> String {
    let mut out = String::new();
    let mapped = name.chars().filter_map(|c| match c {
        ' ' => Some('_'),
        '\'' | '.' => None,
        c if c.is_alphanumeric() || c == '_' || c == '-' => Some(c),
        _ => None,
    });
    for c in mapped {
        if out.len() + c.len_utf8() > MAX_FINGERPRINT_NAME_LEN {
            break;
        }
        out.push(c);
    }
    out
}

/// Readable name, plus a digest of the raw name when the readable form
/// cannot be mapped back to it.
fn name_segment(name: &str) -> String {
    let readable = name_to_filename(name);
    let lossless = readable.len() == name.len()
        && name.chars().all(|c| c == ' ' || c == '-' || c.is_alphanumeric());
    if lossless {
        readable
    } else {
        let digest = sha256_hex(name.as_bytes());
        format!("{readable}{ESCAPE}{}", &digest[..NAME_DIGEST_LEN])
    }
}

fn escape_category(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    for c in category.chars() {
        if c.is_alphanumeric() || c == '-' {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "{ESCAPE}{byte:02x}");
            }
        }
    }
    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
