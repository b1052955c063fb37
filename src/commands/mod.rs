pub mod fingerprint;
pub mod generate;
pub mod list;

use std::sync::Arc;

use anyhow::{Context, Result};
use babycal_core::request::parse_reference_date;
use babycal_core::sanitize::sanitize_name;
use babycal_core::{BabycalConfig, Generator, OutputFormat, PeriodSet, RequestOptions, ResultCache};
use chrono::{Local, NaiveDate};
use clap::Args;

/// Request parameters shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Birth date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub birth: Option<String>,

    /// Name shown in summaries and descriptions
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Skip periods in this category (repeatable)
    #[arg(short, long = "exclude")]
    pub exclude: Vec<String>,

    /// Prefix summaries with the period's glyph
    #[arg(long)]
    pub emoji: bool,
}

impl RequestArgs {
    pub fn to_options(&self, format: OutputFormat, today: NaiveDate) -> RequestOptions {
        RequestOptions::new(parse_reference_date(self.birth.as_deref(), today))
            .with_name(sanitize_name(&self.name))
            .with_excluded(self.exclude.iter().cloned())
            .with_glyph(self.emoji)
            .with_format(format)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Load the period set from the configured location.
pub fn load_generator(config: &BabycalConfig) -> Result<Generator> {
    let periods_path = config.periods_path();
    let periods = PeriodSet::load(&periods_path)
        .with_context(|| format!("Could not load periods from {}", periods_path.display()))?;

    Ok(Generator::new(
        Arc::new(periods),
        ResultCache::new(config.cache_path()),
    ))
}
