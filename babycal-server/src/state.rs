use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use babycal_core::{BabycalConfig, Generator, PeriodSet, ResultCache};
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Generator,
    /// Categories known from the period set; each may be toggled off by query.
    pub categories: Arc<BTreeSet<String>>,
}

impl AppState {
    /// Load the period set once. Failing here keeps the server from starting.
    pub fn new(config: &BabycalConfig) -> Result<Self> {
        let periods_path = config.periods_path();
        let periods = PeriodSet::load(&periods_path)
            .with_context(|| format!("Refusing to start without periods from {}", periods_path.display()))?;

        let cache_dir = config.cache_path();
        info!(
            periods = periods.len(),
            cache_dir = %cache_dir.display(),
            "Loaded period definitions"
        );

        Ok(Self::from_parts(Arc::new(periods), ResultCache::new(cache_dir)))
    }

    pub fn from_parts(periods: Arc<PeriodSet>, cache: ResultCache) -> Self {
        let categories = Arc::new(periods.categories());
        AppState {
            generator: Generator::new(periods, cache),
            categories,
        }
    }
}
