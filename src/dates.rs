use std::fmt;

/// Month used when a line names a month we don't recognise.
pub const FALLBACK_MONTH: u8 = 12;

/// Regex alternation of every month spelling in `MONTHS`, longest spellings first so that
/// `sept` wins over `sep` and `october` over `oct`.
pub const MONTH_ALTERNATION: &str = "january|february|march|april|may|june|july|august|september|october|november|december|sept|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

const MONTHS: &[(&str, u8)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

/// Look up a month by its full or abbreviated English name, ignoring case.
pub fn month_number(name: &str) -> Option<u8> {
    let name = name.trim().to_lowercase();
    MONTHS.iter().find(|(spelling, _)| *spelling == name).map(|&(_, number)| number)
}

/// Like `month_number`, but unrecognised names map to `FALLBACK_MONTH` instead of failing.
pub fn month_or_fallback(name: &str) -> u8 {
    month_number(name).unwrap_or(FALLBACK_MONTH)
}

/// A calendar date as written in a game record. The day isn't validated against the month:
/// whatever number was typed is carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl GameDate {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Build a date from a month name and day number as they appear in chat text.
    pub fn from_month_name(year: u16, month: &str, day: u8) -> Self {
        Self::new(year, month_or_fallback(month), day)
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
