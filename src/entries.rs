//! Parser for the compact one-line-per-game format:
//!
//! ```text
//! Oct 29: David Ellis: 99! 96" 98" 24❄ 815, Final: 706
//! ```

use crate::{parse_number, Attempt, GameDate, LineError, Session};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// The built-in block of game records scraped from the group chat.
pub const BUILTIN_ENTRIES: &str = include_str!("../data/entries.txt");

lazy_static! {
    static ref ENTRY_REGEX: Regex =
        Regex::new(r"^([A-Za-z]+)\.?\s+(\d+):\s*([^:]+):\s*([^,]+),\s*Final:\s*(\d+)").expect("entry regex");
    static ref ATTEMPT_REGEX: Regex = Regex::new(r"(\d+)([^\d\s]{0,3})").expect("attempt regex");
}

/// Pull every `<digits><symbol>` pair out of a cluster of attempts. The symbol may be empty.
pub fn tokenize_attempts(cluster: &str) -> Result<Vec<Attempt>, LineError> {
    ATTEMPT_REGEX
        .captures_iter(cluster)
        .map(|captures| Ok(Attempt::new(parse_number(&captures[1])?, &captures[2])))
        .collect()
}

/// Parse a single `<Month> <Day>: <Player>: <attempts>, Final: <score>` line.
pub fn parse_line(line: &str, year: u16) -> Result<Session, LineError> {
    let captures = ENTRY_REGEX.captures(line.trim()).ok_or(LineError::NoMatch)?;
    let date = GameDate::from_month_name(year, &captures[1], parse_number(&captures[2])?);
    let attempts = tokenize_attempts(captures[4].trim())?;
    let final_score = parse_number(&captures[5])?;
    Session::new(captures[3].trim(), date, attempts, final_score)
}

/// Parse every line of a block, silently dropping the ones that don't make a complete game.
pub fn parse_block(text: &str, year: u16) -> Vec<Session> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match parse_line(line, year) {
            Ok(session) => Some(session),
            Err(error) => {
                debug!("skipping line {} ({}): {}", index + 1, error, line);
                None
            }
        })
        .collect()
}
