use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use babycal_core::{BabycalConfig, OutputFormat};
use tracing::info;

use super::{RequestArgs, load_generator, today};

pub fn run(
    config: &BabycalConfig,
    request: &RequestArgs,
    format: &str,
    no_cache: bool,
    output: Option<&Path>,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let generator = load_generator(config)?;
    let options = request.to_options(format, today());

    let rendered = if no_cache {
        generator.render_uncached(&options)?
    } else {
        generator.render(&options)?
    };
    info!(
        from_cache = rendered.from_cache,
        bytes = rendered.body.len(),
        "Rendered calendar"
    );

    match output {
        Some(path) => std::fs::write(path, &rendered.body)
            .with_context(|| format!("Could not write {}", path.display()))?,
        None => std::io::stdout().lock().write_all(&rendered.body)?,
    }

    Ok(())
}
