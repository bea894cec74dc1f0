//! Best-effort recovery of games from a raw group-chat export. Players' names, date announcements
//! and score lines arrive on separate lines, so the parser carries the last seen player and date
//! forward until a final score closes the game.

use crate::{
    dates::{GameDate, MONTH_ALTERNATION},
    parse_number, Attempt, LineError, Session,
};
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::{collections::HashSet, mem};

pub const DEFAULT_PLAYERS: &[&str] =
    &["Stephen Alexander", "Ellie Alexander", "David Ellis", "Ashley Ellis", "scott caskey"];

/// These players' games are recorded through `parse_entries` and must never come in through here.
pub const DEFAULT_EXCLUDED: &[&str] = &["Abigail Jenquist", "Joshua Jenquist"];

/// Lines containing this marker announce a new day's game.
const DATE_MARKER: &str = "maptap";

lazy_static! {
    static ref DATE_REGEX: Regex =
        Regex::new(&format!(r"(?i){}.*?({})\s+(\d+)", DATE_MARKER, MONTH_ALTERNATION)).expect("date regex");
    static ref SCORE_LINE_REGEX: Regex =
        Regex::new(&format!("^{}", vec![r"(\d+)([^\d\s]{0,3})"; 5].join(r"\s+"))).expect("score line regex");
    static ref FINAL_SCORE_REGEX: Regex = Regex::new(r"(?i)final\s+score:\s*(\d+)").expect("final score regex");
}

/// Who we're listening for, and who we're ignoring.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Option<Regex>,
    excluded: Vec<String>,
}

impl Roster {
    pub fn new<P, E>(players: P, excluded: E) -> Result<Self, regex::Error>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let alternatives: Vec<String> = players
            .into_iter()
            .map(|name| name.as_ref().trim().to_owned())
            .filter(|name| !name.is_empty())
            .map(|name| regex::escape(&name))
            .collect();
        let players = if alternatives.is_empty() {
            None
        } else {
            Some(RegexBuilder::new(&format!("({})", alternatives.join("|"))).case_insensitive(true).build()?)
        };
        let excluded = excluded
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(Self { players, excluded })
    }

    fn is_excluded(&self, line: &str) -> bool {
        let line = line.to_lowercase();
        self.excluded.iter().any(|name| line.contains(name.as_str()))
    }

    /// The player named on this line, as written.
    fn player_in<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.players.as_ref()?.find(line).map(|found| found.as_str())
    }
}

/// Where the parser is between lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Still missing a player, a date, or both.
    Idle { user: Option<String>, date: Option<GameDate> },
    /// Both are known; the next score line with a final score completes a game.
    AwaitingFinal { user: String, date: GameDate },
    /// Inside an excluded player's block, waiting for the next date announcement.
    Excluded { date: Option<GameDate> },
}

impl Default for State {
    fn default() -> Self {
        State::Idle { user: None, date: None }
    }
}

impl State {
    fn from_parts(user: Option<String>, date: Option<GameDate>) -> Self {
        match (user, date) {
            (Some(user), Some(date)) => State::AwaitingFinal { user, date },
            (user, date) => State::Idle { user, date },
        }
    }

    fn into_parts(self) -> (Option<String>, Option<GameDate>) {
        match self {
            State::Idle { user, date } => (user, date),
            State::AwaitingFinal { user, date } => (Some(user), Some(date)),
            State::Excluded { date } => (None, date),
        }
    }

    fn with_user(self, user: String) -> Self {
        let (_, date) = self.into_parts();
        Self::from_parts(Some(user), date)
    }

    fn with_date(self, date: GameDate) -> Self {
        let (user, _) = self.into_parts();
        Self::from_parts(user, Some(date))
    }

    /// The current player is dropped as well, so scores inside an excluded block can't be
    /// credited to whoever spoke before it.
    fn excluded(self) -> Self {
        let (_, date) = self.into_parts();
        State::Excluded { date }
    }
}

/// What a pass over a transcript recovered.
#[derive(Debug, Default)]
pub struct Transcript {
    pub sessions: Vec<Session>,
    /// Score lines that were seen with a known player and date but no final score nearby.
    pub unfinished: usize,
}

/// Line-at-a-time accumulator. Drive it with `feed` from a fold and collect with `finish`.
pub struct TranscriptParser<'r> {
    roster: &'r Roster,
    year: u16,
    state: State,
    transcript: Transcript,
}

impl<'r> TranscriptParser<'r> {
    pub fn new(roster: &'r Roster, year: u16) -> Self {
        Self { roster, year, state: State::default(), transcript: Transcript::default() }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Consume one line. `next` is the following line, which may hold the final score.
    pub fn feed(mut self, line: &str, next: Option<&str>) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return self;
        }
        if let State::Excluded { date } = self.state {
            if !line.to_lowercase().contains(DATE_MARKER) {
                return self;
            }
            self.state = State::Idle { user: None, date };
        }
        if self.roster.is_excluded(line) {
            debug!("skipping excluded block starting at: {}", line);
            self.state = mem::take(&mut self.state).excluded();
        } else if let Some(user) = self.roster.player_in(line) {
            self.state = mem::take(&mut self.state).with_user(user.to_owned());
        } else if let Some(date) = parse_date_announcement(line, self.year) {
            self.state = mem::take(&mut self.state).with_date(date);
        } else if let State::AwaitingFinal { user, date } = &self.state {
            match parse_score_line(line) {
                Some(Ok(attempts)) => match find_final_score(line).or_else(|| next.and_then(find_final_score)) {
                    Some(Ok(final_score)) => {
                        match Session::new(user.as_str(), *date, attempts, final_score) {
                            Ok(session) => self.transcript.sessions.push(session),
                            Err(error) => debug!("dropping game for {} on {}: {}", user, date, error),
                        }
                        self.state = State::default();
                    }
                    Some(Err(error)) => debug!("bad final score near '{}': {}", line, error),
                    None => {
                        debug!("no final score for {} on {} yet", user, date);
                        self.transcript.unfinished += 1;
                    }
                },
                Some(Err(error)) => debug!("bad score line '{}': {}", line, error),
                None => {}
            }
        }
        self
    }

    pub fn finish(self) -> Transcript {
        self.transcript
    }
}

/// `www.MapTap.gg October 23` and the like.
pub fn parse_date_announcement(line: &str, year: u16) -> Option<GameDate> {
    let captures = DATE_REGEX.captures(line)?;
    let day = parse_number(&captures[2]).ok()?;
    Some(GameDate::from_month_name(year, &captures[1], day))
}

/// Five whitespace-separated `<digits><symbol>` tokens at the start of the line.
pub fn parse_score_line(line: &str) -> Option<Result<Vec<Attempt>, LineError>> {
    let captures = SCORE_LINE_REGEX.captures(line)?;
    Some(
        (0..5)
            .map(|round| {
                let score = parse_number(&captures[2 * round + 1])?;
                Ok(Attempt::new(score, &captures[2 * round + 2]))
            })
            .collect(),
    )
}

fn find_final_score(line: &str) -> Option<Result<u32, LineError>> {
    FINAL_SCORE_REGEX.captures(line).map(|captures| parse_number(&captures[1]))
}

/// Run the parser over a whole transcript.
pub fn parse(text: &str, roster: &Roster, year: u16) -> Transcript {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .iter()
        .enumerate()
        .fold(TranscriptParser::new(roster, year), |parser, (index, line)| {
            parser.feed(line, lines.get(index + 1).copied())
        })
        .finish()
}

/// Append parsed sessions to the hand-built table, dropping any the table already covers.
pub fn supplement(table: Vec<Session>, parsed: Vec<Session>) -> Vec<Session> {
    let covered: HashSet<_> = table.iter().map(Session::key).collect();
    let mut sessions = table;
    sessions.extend(parsed.into_iter().filter(|session| {
        let keep = !covered.contains(&session.key());
        if !keep {
            debug!("{} on {} already in table", session.player, session.date);
        }
        keep
    }));
    sessions
}
