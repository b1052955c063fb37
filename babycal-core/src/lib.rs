//! Core of babycal: milestone dates offset from a birth date.
//!
//! - `period`: loads the ordered list of period rules
//! - `milestone`: applies them to a reference date
//! - `text`: German phrases for offsets, summaries and descriptions
//! - `fingerprint` / `cache`: flat-file response cache
//! - `output`: JSON and iCalendar encoders
//! - `generator`: ties the above together per request

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod generator;
pub mod logging;
pub mod milestone;
pub mod output;
pub mod period;
pub mod request;
pub mod sanitize;
pub mod text;

pub use cache::ResultCache;
pub use config::BabycalConfig;
pub use error::{BabycalError, BabycalResult};
pub use fingerprint::Fingerprint;
pub use generator::{Generator, Rendered};
pub use milestone::MilestoneEntry;
pub use period::{Offset, PeriodDefinition, PeriodSet};
pub use request::{OutputFormat, RequestOptions};
