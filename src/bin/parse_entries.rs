use anyhow::Result;
use log::info;
use maptap::{entries, read_source, OutputOptions};
use std::{io::stdout, path::PathBuf};
use structopt::StructOpt;

/// Print CSV rows for new games found in `<Month> <Day>: <Player>: <scores>, Final: <score>` lines
#[derive(StructOpt)]
struct Options {
    #[structopt(flatten)]
    output: OutputOptions,
    /// Text to scrape, or `-` for standard input. Defaults to the built-in block
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load from .env file if it is present
    dotenv::dotenv().ok();
    // Initialize logging
    env_logger::init();
    // Get command line arguments
    let options = Options::from_args();
    let text = match &options.input {
        Some(path) => read_source(path)?,
        None => entries::BUILTIN_ENTRIES.to_owned(),
    };
    let sessions = entries::parse_block(&text, options.output.year);
    info!("Parsed {} complete games", sessions.len());
    let stats = options.output.emit(stdout(), &sessions)?;
    info!(
        "{} games printed ({} rows). {} already recorded.",
        stats.sessions_emitted, stats.rows_written, stats.sessions_skipped
    );
    Ok(())
}
