use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// A recognized timestamp shape and the chrono format that parses it.
struct TimestampPattern {
    regex: Regex,
    format: &'static str,
    /// Whether a match directly wrapped in `[...]` should be returned with its brackets.
    widens_to_brackets: bool,
}

// Compile patterns once; the order is the match priority.
static PATTERNS: LazyLock<Vec<TimestampPattern>> = LazyLock::new(|| {
    [
        (r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}", "%Y-%m-%d %H:%M:%S", true),
        (r"[0-9]{2}/[0-9]{2}/[0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2}", "%m/%d/%Y %H:%M:%S", false),
        (r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}", "%Y-%m-%dT%H:%M:%S", false),
        (r"\[[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\]", "[%Y-%m-%d %H:%M:%S]", false),
    ]
    .into_iter()
    .map(|(pattern, format, widens_to_brackets)| TimestampPattern {
        regex: Regex::new(pattern).expect("Failed to compile timestamp regex"),
        format,
        widens_to_brackets,
    })
    .collect()
});

/// Result of a parse that is allowed to fall back to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    Parsed(NaiveDateTime),
    /// No known format matched; carries the wall-clock time at the moment of parsing.
    Fallback(NaiveDateTime),
}

impl ParsedTimestamp {
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            ParsedTimestamp::Parsed(instant) | ParsedTimestamp::Fallback(instant) => *instant,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedTimestamp::Fallback(_))
    }
}

/// Find the first recognized timestamp in `line` and return it verbatim.
///
/// Patterns are tried in priority order and the first pattern that matches
/// anywhere in the line wins. A `YYYY-MM-DD HH:MM:SS` match enclosed in square
/// brackets is returned together with the brackets.
pub fn extract_timestamp(line: &str) -> Option<&str> {
    for pattern in PATTERNS.iter() {
        if let Some(found) = pattern.regex.find(line) {
            let (start, end) = (found.start(), found.end());
            if pattern.widens_to_brackets && is_bracketed(line, start, end) {
                return Some(&line[start - 1..end + 1]);
            }
            return Some(found.as_str());
        }
    }
    None
}

fn is_bracketed(line: &str, start: usize, end: usize) -> bool {
    let bytes = line.as_bytes();
    start > 0 && bytes[start - 1] == b'[' && bytes.get(end) == Some(&b']')
}

/// Parse a timestamp string previously returned by [`extract_timestamp`].
///
/// Formats are attempted in the same order as extraction. Returns `None`
/// when no format accepts the string, e.g. `2024-13-45 10:00:00`.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(timestamp, pattern.format).ok())
}

/// Like [`parse_timestamp`], but substitutes the current local time when
/// nothing parses. The substitution is reported as [`ParsedTimestamp::Fallback`].
pub fn parse_timestamp_or_now(timestamp: &str) -> ParsedTimestamp {
    match parse_timestamp(timestamp) {
        Some(instant) => ParsedTimestamp::Parsed(instant),
        None => ParsedTimestamp::Fallback(Local::now().naive_local()),
    }
}
