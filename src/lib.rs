use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::{
    collections::HashSet,
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use thiserror::Error;

pub mod dates;
pub mod entries;
pub mod sessions;
pub mod transcript;

pub use dates::GameDate;

/// Header line of the destination file. Lines starting with `HEADER_TOKEN` are never treated as data.
pub const OUTPUT_HEADER: [&str; 6] =
    ["user", "date", "location_number", "location_score", "location_emoji", "total_score"];
pub const HEADER_TOKEN: &str = "user";

/// Every game has exactly this many rounds.
pub const ATTEMPTS_PER_SESSION: usize = 5;

/// Why a line of input didn't produce a session. These are only ever logged, never surfaced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("line does not look like a game record")]
    NoMatch,
    #[error("expected 5 attempts, found {0}")]
    AttemptCount(usize),
    #[error("number out of range: {0}")]
    Number(String),
}

pub(crate) fn parse_number<T: std::str::FromStr>(digits: &str) -> Result<T, LineError> {
    digits.parse().map_err(|_| LineError::Number(digits.to_owned()))
}

/// One scored round: the points and whatever symbol was typed right after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub score: u32,
    pub tag: String,
}

impl Attempt {
    pub fn new(score: u32, tag: impl Into<String>) -> Self {
        Self { score, tag: tag.into() }
    }
}

/// A player's complete five-round game on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub player: String,
    pub date: GameDate,
    pub attempts: [Attempt; ATTEMPTS_PER_SESSION],
    pub final_score: u32,
}

impl Session {
    /// Build a session from however many attempts were recognised. Anything other than five is rejected.
    pub fn new(player: impl Into<String>, date: GameDate, attempts: Vec<Attempt>, final_score: u32) -> Result<Self, LineError> {
        let attempts = <[Attempt; ATTEMPTS_PER_SESSION]>::try_from(attempts)
            .map_err(|attempts| LineError::AttemptCount(attempts.len()))?;
        Ok(Self { player: player.into(), date, attempts, final_score })
    }

    /// The (lowercased player, date) pair used to decide whether a session is already recorded.
    pub fn key(&self) -> (String, String) {
        (self.player.to_lowercase(), self.date.to_string())
    }

    /// The output rows for this session, one per attempt, numbered from 1.
    pub fn rows(&self) -> impl Iterator<Item = [String; 6]> + '_ {
        let date = self.date.to_string();
        self.attempts.iter().enumerate().map(move |(index, attempt)| {
            [
                self.player.clone(),
                date.clone(),
                (index + 1).to_string(),
                attempt.score.to_string(),
                attempt.tag.clone(),
                self.final_score.to_string(),
            ]
        })
    }
}

/// The set of (player, date) pairs already present in the destination file.
#[derive(Debug, Default, Clone)]
pub struct ExistingKeys(HashSet<(String, String)>);

impl ExistingKeys {
    /// Read keys from the destination file. A missing or unreadable file yields an empty set.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                let keys = Self::from_reader(file);
                info!("loaded {} existing keys from {}", keys.len(), path.display());
                keys
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!("{} not found, treating every session as new", path.display());
                Self::default()
            }
            Err(error) => {
                warn!("couldn't open {}: {}; treating every session as new", path.display(), error);
                Self::default()
            }
        }
    }

    /// Read keys from any CSV source. Records that fail to decode are skipped one at a time.
    ///
    /// Quotes are plain characters here: rows are written unquoted, so a `"` tag must not open a field.
    pub fn from_reader(reader: impl Read) -> Self {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut keys = Self::default();
        for (line, record) in csv_reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(error) => {
                    debug!("existing data line {}: {}", line + 1, error);
                    continue;
                }
            };
            match (record.get(0), record.get(1)) {
                (Some(user), Some(date)) if !user.starts_with(HEADER_TOKEN) => keys.insert(user, date),
                _ => {}
            }
        }
        keys
    }

    pub fn insert(&mut self, player: &str, date: &str) {
        self.0.insert((player.to_lowercase(), date.to_owned()));
    }

    pub fn contains(&self, player: &str, date: &str) -> bool {
        self.0.contains(&(player.to_lowercase(), date.to_owned()))
    }

    pub fn contains_session(&self, session: &Session) -> bool {
        self.0.contains(&session.key())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmitOptions {
    /// Quote fields that contain separators or quotes. Off by default so rows come out exactly as typed.
    pub quote: bool,
    /// Also block a (player, date) pair once it has been emitted during this run.
    pub one_per_day: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitStats {
    pub sessions_emitted: usize,
    pub sessions_skipped: usize,
    pub rows_written: usize,
}

/// Writes new sessions as CSV rows, skipping any whose key is already recorded.
pub struct Emitter<W: io::Write> {
    writer: csv::Writer<W>,
    existing: ExistingKeys,
    one_per_day: bool,
    stats: EmitStats,
}

impl<W: io::Write> Emitter<W> {
    pub fn new(writer: W, existing: ExistingKeys, options: EmitOptions) -> Self {
        let quote_style = if options.quote { csv::QuoteStyle::Necessary } else { csv::QuoteStyle::Never };
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).quote_style(quote_style).from_writer(writer),
            existing,
            one_per_day: options.one_per_day,
            stats: EmitStats::default(),
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(OUTPUT_HEADER)?;
        Ok(())
    }

    /// Write the session's five rows unless it is already recorded. Returns whether anything was written.
    pub fn emit(&mut self, session: &Session) -> Result<bool> {
        if self.existing.contains_session(session) {
            debug!("{} on {} already recorded", session.player, session.date);
            self.stats.sessions_skipped += 1;
            return Ok(false);
        }
        for row in session.rows() {
            self.writer.write_record(&row)?;
            self.stats.rows_written += 1;
        }
        if self.one_per_day {
            let (player, date) = session.key();
            self.existing.insert(&player, &date);
        }
        self.stats.sessions_emitted += 1;
        Ok(true)
    }

    pub fn emit_all<'a>(&mut self, sessions: impl IntoIterator<Item = &'a Session>) -> Result<()> {
        for session in sessions {
            self.emit(session)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> EmitStats {
        self.stats
    }

    /// Flush everything and hand back the underlying writer.
    pub fn finish(self) -> Result<(W, EmitStats)> {
        let stats = self.stats;
        let writer = self.writer.into_inner().map_err(|error| error.into_error())?;
        Ok((writer, stats))
    }
}

// Output settings shared by both binaries.
#[derive(Debug, StructOpt)]
pub struct OutputOptions {
    /// File the printed rows get appended to. Sessions already in it are not printed again
    #[structopt(short, long, env = "MAPTAP_DATA_CSV", default_value = "data.csv", parse(from_os_str))]
    pub existing: PathBuf,
    /// Year for dates that don't carry one
    #[structopt(short, long, env = "MAPTAP_YEAR", default_value = "2025")]
    pub year: u16,
    /// Print the header line first, for starting a new file
    #[structopt(long)]
    pub header: bool,
    /// Quote fields containing commas or quotes
    #[structopt(long)]
    pub quote: bool,
    /// Print at most one game per player per day
    #[structopt(long)]
    pub one_per_day: bool,
}

impl OutputOptions {
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions { quote: self.quote, one_per_day: self.one_per_day }
    }

    /// Load the existing keys and write every new session to `writer`.
    pub fn emit<W: io::Write>(&self, writer: W, sessions: &[Session]) -> Result<EmitStats> {
        let existing = ExistingKeys::load(&self.existing);
        let mut emitter = Emitter::new(writer, existing, self.emit_options());
        if self.header {
            emitter.write_header()?;
        }
        emitter.emit_all(sessions)?;
        let (_, stats) = emitter.finish()?;
        Ok(stats)
    }
}

/// Read an input named on the command line. `-` means standard input.
pub fn read_source(source: impl AsRef<Path>) -> Result<String> {
    let source = source.as_ref();
    if source == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("error reading standard input")?;
        Ok(text)
    } else {
        fs::read_to_string(source).with_context(|| format!("error reading {}", source.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashset;

    fn session(player: &str, date: GameDate, final_score: u32) -> Session {
        Session::new(
            player,
            date,
            vec![
                Attempt::new(99, "!"),
                Attempt::new(96, "\""),
                Attempt::new(98, "\""),
                Attempt::new(24, "❄"),
                Attempt::new(815, ""),
            ],
            final_score,
        )
        .unwrap()
    }

    fn emit_to_string(existing: ExistingKeys, options: EmitOptions, sessions: &[Session]) -> (String, EmitStats) {
        let mut emitter = Emitter::new(Vec::new(), existing, options);
        emitter.emit_all(sessions).unwrap();
        let (out, stats) = emitter.finish().unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_loader_counts_data_lines() {
        let data = "user,date,location_number,location_score,location_emoji,total_score\n\
                    David Ellis,2025-10-29,1,99,!,706\n\
                    Ashley Ellis,2025-10-29,1,99,!,746\n\
                    scott caskey,2025-10-30,1,99,!,874\n";
        let keys = ExistingKeys::from_reader(data.as_bytes());
        assert_eq!(keys.len(), 3);
        assert_eq!(
            keys.0,
            hashset![
                ("david ellis".to_owned(), "2025-10-29".to_owned()),
                ("ashley ellis".to_owned(), "2025-10-29".to_owned()),
                ("scott caskey".to_owned(), "2025-10-30".to_owned()),
            ]
        );
    }

    #[test]
    fn test_loader_treats_quote_tags_as_text() {
        let data = "user,date,location_number,location_score,location_emoji,total_score\n\
                    scott caskey,2025-10-29,5,96,\",771\n\
                    David Ellis,2025-10-30,1,99,!,821\n\
                    Ashley Ellis,2025-10-31,2,91,$,938\n";
        let keys = ExistingKeys::from_reader(data.as_bytes());
        assert_eq!(
            keys.0,
            hashset![
                ("scott caskey".to_owned(), "2025-10-29".to_owned()),
                ("david ellis".to_owned(), "2025-10-30".to_owned()),
                ("ashley ellis".to_owned(), "2025-10-31".to_owned()),
            ]
        );
    }

    #[test]
    fn test_loader_skips_lines_without_comma() {
        let data = "user,date\nnonsense\n\nDavid Ellis , 2025-11-01 ,3\n";
        let keys = ExistingKeys::from_reader(data.as_bytes());
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("DAVID ELLIS", "2025-11-01"));
    }

    #[test]
    fn test_loader_survives_bad_bytes() {
        let mut data = b"David Ellis,2025-11-01,1\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b',', b'x', b'\n']);
        data.extend_from_slice(b"Ashley Ellis,2025-11-02,1\n");
        let keys = ExistingKeys::from_reader(&data[..]);
        assert!(keys.contains("david ellis", "2025-11-01"));
        assert!(keys.contains("ashley ellis", "2025-11-02"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let keys = ExistingKeys::load("this/path/does/not/exist.csv");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_session_requires_five_attempts() {
        let four = vec![Attempt::new(1, "!"); 4];
        assert_eq!(
            Session::new("x", GameDate::new(2025, 1, 1), four, 1).unwrap_err(),
            LineError::AttemptCount(4)
        );
        let six = vec![Attempt::new(1, "!"); 6];
        assert_eq!(
            Session::new("x", GameDate::new(2025, 1, 1), six, 1).unwrap_err(),
            LineError::AttemptCount(6)
        );
    }

    #[test]
    fn test_emits_five_rows() {
        let sessions = [session("David Ellis", GameDate::new(2025, 10, 29), 706)];
        let (out, stats) = emit_to_string(ExistingKeys::default(), EmitOptions::default(), &sessions);
        assert_eq!(
            out,
            "David Ellis,2025-10-29,1,99,!,706\n\
             David Ellis,2025-10-29,2,96,\",706\n\
             David Ellis,2025-10-29,3,98,\",706\n\
             David Ellis,2025-10-29,4,24,❄,706\n\
             David Ellis,2025-10-29,5,815,,706\n"
        );
        assert_eq!(stats, EmitStats { sessions_emitted: 1, sessions_skipped: 0, rows_written: 5 });
    }

    #[test]
    fn test_existing_key_blocks_session() {
        let mut existing = ExistingKeys::default();
        existing.insert("david ellis", "2025-10-29");
        let sessions = [
            session("David Ellis", GameDate::new(2025, 10, 29), 1),
            session("David Ellis", GameDate::new(2025, 10, 30), 2),
        ];
        let (out, stats) = emit_to_string(existing, EmitOptions::default(), &sessions);
        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().all(|line| line.starts_with("David Ellis,2025-10-30,")));
        assert_eq!(stats.sessions_skipped, 1);
    }

    #[test]
    fn test_same_day_repeats_by_default() {
        let sessions = [
            session("Ashley Ellis", GameDate::new(2025, 10, 30), 916),
            session("Ashley Ellis", GameDate::new(2025, 10, 30), 764),
        ];
        let (out, _) = emit_to_string(ExistingKeys::default(), EmitOptions::default(), &sessions);
        assert_eq!(out.lines().count(), 10);

        let options = EmitOptions { one_per_day: true, ..EmitOptions::default() };
        let (out, stats) = emit_to_string(ExistingKeys::default(), options, &sessions);
        assert_eq!(out.lines().count(), 5);
        assert!(out.ends_with(",916\n"));
        assert_eq!(stats.sessions_skipped, 1);
    }

    #[test]
    fn test_rerun_against_own_output_is_empty() {
        let sessions = [session("David Ellis", GameDate::new(2025, 10, 29), 706)];
        let (first, _) = emit_to_string(ExistingKeys::default(), EmitOptions::default(), &sessions);
        let existing = ExistingKeys::from_reader(first.as_bytes());
        let (second, stats) = emit_to_string(existing, EmitOptions::default(), &sessions);
        assert!(second.is_empty());
        assert_eq!(stats.sessions_emitted, 0);
    }

    #[test]
    fn test_rerun_mixed_players_is_empty() {
        let sessions = [
            session("David Ellis", GameDate::new(2025, 10, 29), 706),
            session("Ashley Ellis", GameDate::new(2025, 10, 29), 746),
            session("scott caskey", GameDate::new(2025, 10, 30), 874),
        ];
        let (first, _) = emit_to_string(ExistingKeys::default(), EmitOptions::default(), &sessions);
        let existing = ExistingKeys::from_reader(first.as_bytes());
        assert_eq!(existing.len(), 3);
        let (second, stats) = emit_to_string(existing, EmitOptions::default(), &sessions);
        assert!(second.is_empty());
        assert_eq!(stats.sessions_skipped, 3);
    }

    #[test]
    fn test_rerun_builtin_block_is_empty() {
        let sessions = crate::entries::parse_block(crate::entries::BUILTIN_ENTRIES, 2025);
        let (first, stats) = emit_to_string(ExistingKeys::default(), EmitOptions::default(), &sessions);
        assert_eq!(stats.sessions_emitted, sessions.len());
        let keys: HashSet<_> = sessions.iter().map(Session::key).collect();
        let existing = ExistingKeys::from_reader(first.as_bytes());
        assert_eq!(existing.len(), keys.len());
        let (second, stats) = emit_to_string(existing, EmitOptions::default(), &sessions);
        assert!(second.is_empty());
        assert_eq!(stats.sessions_emitted, 0);
    }

    #[test]
    fn test_quoted_output_reloads() {
        let sessions = [
            session("David Ellis", GameDate::new(2025, 10, 29), 706),
            session("Ashley Ellis", GameDate::new(2025, 10, 30), 746),
        ];
        let options = EmitOptions { quote: true, one_per_day: false };
        let (first, _) = emit_to_string(ExistingKeys::default(), options, &sessions);
        let existing = ExistingKeys::from_reader(first.as_bytes());
        assert!(existing.contains("david ellis", "2025-10-29"));
        assert!(existing.contains("ashley ellis", "2025-10-30"));
    }

    #[test]
    fn test_header_and_quoting() {
        let mut emitter = Emitter::new(Vec::new(), ExistingKeys::default(), EmitOptions { quote: true, one_per_day: false });
        emitter.write_header().unwrap();
        emitter.emit(&session("David Ellis", GameDate::new(2025, 10, 29), 706)).unwrap();
        let (out, _) = emitter.finish().unwrap();
        let out = String::from_utf8(out).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("user,date,location_number,location_score,location_emoji,total_score"));
        assert_eq!(lines.next(), Some("David Ellis,2025-10-29,1,99,!,706"));
        assert_eq!(lines.next(), Some("David Ellis,2025-10-29,2,96,\"\"\"\",706"));
    }
}
