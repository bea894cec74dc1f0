use anyhow::{Context, Result};
use log::info;
use maptap::{
    read_source, sessions,
    transcript::{self, Roster, DEFAULT_EXCLUDED, DEFAULT_PLAYERS},
    OutputOptions,
};
use std::{io::stdout, path::PathBuf};
use structopt::StructOpt;

/// Print CSV rows for new games from the hand-extracted chat table, plus any recovered from a raw transcript
#[derive(StructOpt)]
struct Options {
    #[structopt(flatten)]
    output: OutputOptions,
    /// Player names to listen for in the transcript
    #[structopt(long = "player", env = "MAPTAP_PLAYERS", use_delimiter = true)]
    players: Vec<String>,
    /// Players whose blocks are skipped entirely
    #[structopt(long = "exclude", env = "MAPTAP_EXCLUDED", use_delimiter = true)]
    excluded: Vec<String>,
    /// Don't print the built-in table, only what the transcript parser finds
    #[structopt(long)]
    no_table: bool,
    /// Raw transcript to scan, or `-` for standard input
    #[structopt(parse(from_os_str))]
    transcript: Option<PathBuf>,
}

fn or_defaults(names: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if names.is_empty() {
        defaults.iter().map(|name| name.to_string()).collect()
    } else {
        names
    }
}

fn main() -> Result<()> {
    // Load from .env file if it is present
    dotenv::dotenv().ok();
    // Initialize logging
    env_logger::init();
    // Get command line arguments
    let options = Options::from_args();
    let table = if options.no_table { Vec::new() } else { sessions::transcript_sessions() };
    info!("{} games in the built-in table", table.len());
    let parsed = match &options.transcript {
        Some(path) => {
            let roster = Roster::new(
                or_defaults(options.players.clone(), DEFAULT_PLAYERS),
                or_defaults(options.excluded.clone(), DEFAULT_EXCLUDED),
            )
            .context("invalid player list")?;
            let text = read_source(path)?;
            let found = transcript::parse(&text, &roster, options.output.year);
            info!(
                "Recovered {} games from {}. {} score lines had no final score.",
                found.sessions.len(),
                path.display(),
                found.unfinished
            );
            found.sessions
        }
        None => Vec::new(),
    };
    let sessions = transcript::supplement(table, parsed);
    let stats = options.output.emit(stdout(), &sessions)?;
    info!(
        "{} games printed ({} rows). {} already recorded.",
        stats.sessions_emitted, stats.rows_written, stats.sessions_skipped
    );
    Ok(())
}
