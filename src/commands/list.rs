use anyhow::Result;
use babycal_core::{BabycalConfig, OutputFormat};
use owo_colors::OwoColorize;

use super::{RequestArgs, load_generator, today};
use crate::render::Render;

pub fn run(config: &BabycalConfig, request: &RequestArgs) -> Result<()> {
    let generator = load_generator(config)?;
    let options = request.to_options(OutputFormat::Json, today());
    let entries = generator.milestones(&options)?;

    if entries.is_empty() {
        println!("{}", "No milestones (everything excluded?)".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("Meilensteine ab {}", options.reference_date.format("%d.%m.%Y")).bold()
    );
    for entry in &entries {
        println!("  {}", entry.render(&options));
    }

    Ok(())
}
