/// Version tag embedded in cache fingerprints, event UIDs and the PRODID.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Glyph used when a period definition does not provide one.
pub const DEFAULT_GLYPH: &str = "✨";

/// Phrase for an all-zero offset.
pub const ANNIVERSARY_PHRASE: &str = "Geburtstag";

/// Calendar name used when the request carries no name.
pub const DEFAULT_CALENDAR_NAME: &str = "Baby Kalender";

/// Upper bound, in bytes, for the name segment of a cache fingerprint.
pub const MAX_FINGERPRINT_NAME_LEN: usize = 100;

/// Upper bound, in bytes, for a whole fingerprint before its optional
/// segments are replaced by a digest. Leaves room for the cache file
/// prefix and suffix under the common 255-byte file name limit.
pub const MAX_FINGERPRINT_LEN: usize = 200;

/// Cache files are named `results_<fingerprint>.json` whatever the format.
pub const CACHE_FILE_PREFIX: &str = "results_";
pub const CACHE_FILE_SUFFIX: &str = ".json";
