//! Colored terminal rendering for milestone entries.

use babycal_core::milestone::MilestoneEntry;
use babycal_core::request::RequestOptions;
use babycal_core::text::format_summary;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self, options: &RequestOptions) -> String;
}

impl Render for MilestoneEntry {
    fn render(&self, options: &RequestOptions) -> String {
        let summary = format_summary(&options.name, &self.phrase, options.include_glyph, self.glyph());
        let days = format!("{:+} Tage", self.days_between);
        let date = if self.days_between < 0 {
            self.formatted_date.yellow().to_string()
        } else {
            self.formatted_date.green().to_string()
        };

        format!("{} {} {}", date, summary, days.dimmed())
    }
}
