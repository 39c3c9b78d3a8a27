pub mod aggregator;
pub mod client;
pub mod config;
pub mod entity;
pub mod parser;
pub mod rss;
pub mod util;

use client::Fetcher;
use config::Config;
use std::error::Error;
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "feed.xml";
/// Optional path to a JSON file overriding any subset of [`Config`] fields.
/// Unset means the built-in show list and feed metadata are used.
pub const CONFIG_ENV: &str = "PODCAST_PICKS_CONFIG";

pub fn usage() -> String {
    format!(
        "usage: podcast_picks [OUTPUT]\n\n\
         Fetch the configured podcast feeds and write one curated RSS feed.\n\n\
         OUTPUT    file to write, overwritten if present (default: {})\n\n\
         environment:\n  \
         {}    JSON file overriding the built-in config\n  \
         RUST_LOG    log level (default: info)",
        DEFAULT_OUTPUT, CONFIG_ENV
    )
}

/// One full run: fetch every show, merge, and write the curated feed to `output`.
/// Returns the number of episodes written.
pub fn build(config: &Config, fetcher: &impl Fetcher, output: &Path) -> Result<usize, Box<dyn Error>> {
    let eps = aggregator::collect_episodes(config, fetcher);
    rss::write_feed(&config.meta, &eps, output)?;
    Ok(eps.len())
}

// default impl of the feed fetcher
pub fn get_fetcher(config: &Config) -> impl Fetcher {
    client::HttpClient::from_config(config)
}
