use podcast_picks::{config::Config, util, CONFIG_ENV, DEFAULT_OUTPUT};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("-h") | Some("--help")) {
        println!("{}", podcast_picks::usage());
        return Ok(());
    }
    util::init_log()?;

    let output = arg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => Config::load(&PathBuf::from(path))?,
        None => Config::default(),
    };

    log::info!("{} - Building Feed", config.meta.title);
    log::info!("{}", "=".repeat(50));

    let fetcher = podcast_picks::get_fetcher(&config);
    let count = podcast_picks::build(&config, &fetcher, &output)?;
    log::info!("Feed ready: {} episodes in {}", count, output.display());
    Ok(())
}
