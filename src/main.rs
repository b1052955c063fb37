mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use babycal_core::{BabycalConfig, logging};
use clap::{Parser, Subcommand};

use crate::commands::RequestArgs;

#[derive(Parser)]
#[command(name = "babycal")]
#[command(about = "Generate milestone calendars (JSON or .ics) from a birth date")]
struct Cli {
    /// Path to a config file (defaults to ~/.config/babycal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the calendar as JSON or iCalendar
    Generate {
        #[command(flatten)]
        request: RequestArgs,

        /// Output format: json or ical
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Skip the response cache
        #[arg(long)]
        no_cache: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the milestones in a human-readable list
    List {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Show the cache file a request maps to
    Fingerprint {
        #[command(flatten)]
        request: RequestArgs,

        /// Output format: json or ical
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BabycalConfig::load(cli.config.as_deref())?;
    logging::init_with_level(&config.log_level);

    match cli.command {
        Commands::Generate {
            request,
            format,
            no_cache,
            output,
        } => commands::generate::run(&config, &request, &format, no_cache, output.as_deref()),
        Commands::List { request } => commands::list::run(&config, &request),
        Commands::Fingerprint { request, format } => {
            commands::fingerprint::run(&config, &request, &format)
        }
    }
}
