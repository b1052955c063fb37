//! Flat-file response cache.
//!
//! One file per fingerprint, no expiry. Concurrent writers of the same key
//! produce the same bytes, so each write replaces the file atomically and the
//! last writer wins.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::constants::{CACHE_FILE_PREFIX, CACHE_FILE_SUFFIX};
use crate::error::{BabycalError, BabycalResult};
use crate::fingerprint::Fingerprint;
use crate::output::decode_json;
use crate::request::OutputFormat;

#[derive(Debug, Clone)]
pub struct ResultCache {
    root: PathBuf,
}

impl ResultCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ResultCache { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `results_<fingerprint>.json`, whatever the format.
    pub fn path_for(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.root
            .join(format!("{CACHE_FILE_PREFIX}{fingerprint}{CACHE_FILE_SUFFIX}"))
    }

    /// Cached bytes, or `None` if the entry is absent or unusable.
    pub fn load(&self, fingerprint: &Fingerprint, format: OutputFormat) -> Option<Vec<u8>> {
        let path = self.path_for(fingerprint);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read cache file");
                return None;
            }
        };

        if !is_intact(&bytes, format) {
            warn!(path = %path.display(), "Ignoring corrupt cache file");
            return None;
        }

        debug!(path = %path.display(), "Cache hit");
        Some(bytes)
    }

    /// Write `bytes` for `fingerprint`, replacing any previous entry.
    pub fn store(&self, fingerprint: &Fingerprint, bytes: &[u8]) -> BabycalResult<PathBuf> {
        let path = self.path_for(fingerprint);
        let cache_error =
            |e: std::io::Error| BabycalError::Cache(format!("{}: {e}", path.display()));

        std::fs::create_dir_all(&self.root).map_err(cache_error)?;

        let mut tmp = NamedTempFile::new_in(&self.root).map_err(cache_error)?;
        tmp.write_all(bytes).map_err(cache_error)?;
        tmp.persist(&path).map_err(|e| cache_error(e.error))?;

        info!(path = %path.display(), "Stored result in cache");
        Ok(path)
    }
}

fn is_intact(bytes: &[u8], format: OutputFormat) -> bool {
    match format {
        OutputFormat::Json => decode_json(bytes).is_ok(),
        OutputFormat::Ical => {
            bytes.starts_with(b"BEGIN:VCALENDAR") && bytes.trim_ascii_end().ends_with(b"END:VCALENDAR")
        }
    }
}
