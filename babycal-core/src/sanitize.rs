//! Cleanup of user supplied display names.

use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s'.\-]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduce a free-text name to letters, digits, spaces, `'`, `.` and `-`.
///
/// Tags are removed first so that `<b>Lea</b>` becomes `Lea`, not `bLeab`.
pub fn sanitize_name(input: &str) -> String {
    let without_tags = HTML_TAG.replace_all(input.trim(), "");
    let allowed = DISALLOWED.replace_all(&without_tags, "");
    WHITESPACE.replace_all(allowed.trim(), " ").into_owned()
}
