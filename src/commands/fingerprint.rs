use anyhow::Result;
use babycal_core::{BabycalConfig, ResultCache, constants::VERSION};

use super::{RequestArgs, today};

pub fn run(config: &BabycalConfig, request: &RequestArgs, format: &str) -> Result<()> {
    let options = request.to_options(format.parse()?, today());
    let fingerprint = options.fingerprint(VERSION);
    let cache = ResultCache::new(config.cache_path());

    println!("{}", fingerprint);
    println!("{}", cache.path_for(&fingerprint).display());
    Ok(())
}
