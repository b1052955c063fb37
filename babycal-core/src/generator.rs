//! Request → cached or freshly rendered calendar bytes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::cache::ResultCache;
use crate::constants::VERSION;
use crate::error::BabycalResult;
use crate::fingerprint::Fingerprint;
use crate::milestone::{MilestoneEntry, compute};
use crate::output::{RenderContext, encode_ics, encode_json};
use crate::period::PeriodSet;
use crate::request::{OutputFormat, RequestOptions};

/// A rendered response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: Vec<u8>,
    pub format: OutputFormat,
    pub from_cache: bool,
}

/// Stateless apart from the shared, read-only period set.
#[derive(Debug, Clone)]
pub struct Generator {
    periods: Arc<PeriodSet>,
    cache: ResultCache,
    version: String,
}

impl Generator {
    pub fn new(periods: Arc<PeriodSet>, cache: ResultCache) -> Self {
        Generator {
            periods,
            cache,
            version: VERSION.to_string(),
        }
    }

    /// Override the version tag (it feeds fingerprints, UIDs and PRODID).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn periods(&self) -> &PeriodSet {
        &self.periods
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn fingerprint(&self, options: &RequestOptions) -> Fingerprint {
        options.fingerprint(&self.version)
    }

    pub fn milestones(&self, options: &RequestOptions) -> BabycalResult<Vec<MilestoneEntry>> {
        compute(&self.periods, options.reference_date, &options.excluded)
    }

    /// Serve from cache when possible, otherwise render and cache.
    ///
    /// A failed cache write is logged and the fresh body is still returned.
    pub fn render(&self, options: &RequestOptions) -> BabycalResult<Rendered> {
        let fingerprint = self.fingerprint(options);

        if let Some(body) = self.cache.load(&fingerprint, options.format) {
            return Ok(Rendered {
                body,
                format: options.format,
                from_cache: true,
            });
        }

        let rendered = self.render_uncached(options)?;

        if let Err(e) = self.cache.store(&fingerprint, &rendered.body) {
            warn!(fingerprint = %fingerprint, error = %e, "Serving uncached result");
        }

        Ok(rendered)
    }

    /// Compute and encode without touching the cache.
    pub fn render_uncached(&self, options: &RequestOptions) -> BabycalResult<Rendered> {
        let entries = self.milestones(options)?;
        debug!(
            date = %options.reference_date,
            format = %options.format,
            entries = entries.len(),
            "Rendering milestones"
        );

        let ctx = RenderContext {
            reference_date: options.reference_date,
            name: &options.name,
            include_glyph: options.include_glyph,
            version: &self.version,
        };
        let now = Utc::now();

        let body = match options.format {
            OutputFormat::Json => encode_json(&entries, &ctx, &options.excluded, now)?,
            OutputFormat::Ical => encode_ics(&entries, &ctx, now)?,
        };

        Ok(Rendered {
            body,
            format: options.format,
            from_cache: false,
        })
    }
}
